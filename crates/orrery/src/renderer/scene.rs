use std::f64::consts::TAU;

use glam::Vec2;

use crate::api::sim::{RenderState, Simulation};
use crate::bodies::Color;
use crate::core::orbit::orbit_position;
use crate::renderer::camera::OrbitCamera;
use crate::renderer::instance::{BodyInstance, OrbitVertex, SceneBuffer};

/// Line segments per orbit ring.
pub const ORBIT_SEGMENTS: usize = 64;
/// Glow shell radius relative to the star.
pub const GLOW_SCALE: f32 = 1.2;
pub const GLOW_ALPHA: f32 = 0.1;
const SELECTED_RING_ALPHA: f32 = 0.8;
const RING_ALPHA: f32 = 0.3;
/// Hit area relative to the projected disc.
const HIT_GENEROSITY: f32 = 1.5;
/// Sub-pixel bodies are still clickable within this many pixels.
pub const MIN_PICK_RADIUS_PX: f32 = 8.0;

fn flag(on: bool) -> f32 {
    if on { 1.0 } else { 0.0 }
}

/// Build the frame's instances and orbit rings from the simulation.
pub fn compose(sim: &Simulation, camera: &OrbitCamera, buf: &mut SceneBuffer) {
    compose_state(&sim.render_state(), camera, buf);
}

/// Same as [`compose`] for an already-captured render state.
pub fn compose_state(state: &RenderState<'_>, camera: &OrbitCamera, buf: &mut SceneBuffer) {
    buf.clear();

    // Back to front so translucent passes blend correctly
    let eye = camera.position();
    let mut order: Vec<_> = state.bodies.iter().collect();
    order.sort_by(|a, b| b.position.distance_squared(eye).total_cmp(&a.position.distance_squared(eye)));

    for body in order {
        buf.push(BodyInstance {
            x: body.position.x,
            y: body.position.y,
            z: body.position.z,
            radius: body.radius,
            r: body.color.r,
            g: body.color.g,
            b: body.color.b,
            alpha: 1.0,
            spin: body.spin,
            emissive: flag(body.is_star),
            selected: flag(body.selected),
            body_index: body.index as f32,
        });
    }

    buf.begin_glow();
    if let Some(star) = state.star() {
        buf.push(BodyInstance {
            radius: star.radius * GLOW_SCALE,
            r: star.color.r,
            g: star.color.g,
            b: star.color.b,
            alpha: GLOW_ALPHA,
            emissive: 1.0,
            body_index: star.index as f32,
            ..BodyInstance::default()
        });
    }

    if state.show_orbits {
        buf.ring_stride = (ORBIT_SEGMENTS + 1) as u32;
        for body in state.bodies.iter().filter(|b| !b.is_star && b.orbit_radius > 0.0) {
            let (color, alpha) = if body.selected {
                (Color::WHITE, SELECTED_RING_ALPHA)
            } else {
                (Color::GREY, RING_ALPHA)
            };
            let radius = body.orbit_radius as f64;
            // Closed strip: the last vertex repeats the first
            for i in 0..=ORBIT_SEGMENTS {
                let angle = TAU * (i % ORBIT_SEGMENTS) as f64 / ORBIT_SEGMENTS as f64;
                buf.orbit_vertices.push(OrbitVertex::new(orbit_position(angle, radius), color, alpha));
            }
        }
    }
}

/// Frontmost body whose projected disc contains `screen_pos`.
pub fn hit_test<'a>(state: &RenderState<'a>, camera: &OrbitCamera, screen_pos: Vec2) -> Option<&'a str> {
    state
        .bodies
        .iter()
        .filter_map(|body| {
            let proj = camera.project(body.position)?;
            let pick_radius = (body.radius * proj.scale * HIT_GENEROSITY).max(MIN_PICK_RADIUS_PX);
            (proj.pos.distance_squared(screen_pos) <= pick_radius * pick_radius)
                .then_some((body.id, proj.depth))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}
