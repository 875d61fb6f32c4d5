use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

use crate::api::config::CameraConfig;

/// Keeps the view away from the poles, where the up vector degenerates.
const MAX_ELEVATION: f32 = 1.5;
const NEAR: f32 = 0.01;
const FAR: f32 = 1000.0;

/// Projection result from world space to screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Screen position in pixels, origin top-left.
    pub pos: Vec2,
    /// Distance in front of the eye along the view axis.
    pub depth: f32,
    /// Pixels per world unit at this depth.
    pub scale: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
    /// Eye position, w unused.
    pub eye: [f32; 4],
}

/// Perspective camera orbiting a target point.
///
/// The target eases toward the simulation's focus point each frame; drag and
/// wheel input adjust azimuth, elevation and distance around it.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Rotation around the Y axis (radians). 0 looks down -Z.
    pub azimuth: f32,
    /// Angle above the orbital plane (radians).
    pub elevation: f32,
    pub distance: f32,
    /// Point the camera looks at.
    pub target: Vec3,
    pub screen_width: f32,
    pub screen_height: f32,
    min_distance: f32,
    max_distance: f32,
    fov_y: f32,
    smoothing: f32,
    orbit_sensitivity: f32,
    zoom_sensitivity: f32,
    home: (f32, f32, f32),
}

impl OrbitCamera {
    pub fn new(config: &CameraConfig, screen_width: f32, screen_height: f32) -> Self {
        let eye = Vec3::from_array(config.eye);
        let raw_distance = eye.length();
        let (azimuth, elevation) = if raw_distance > 1e-6 {
            (eye.x.atan2(eye.z), (eye.y / raw_distance).asin().clamp(-MAX_ELEVATION, MAX_ELEVATION))
        } else {
            (0.0, 0.0)
        };
        let distance = raw_distance.clamp(config.min_distance, config.max_distance);

        Self {
            azimuth,
            elevation,
            distance,
            target: Vec3::ZERO,
            screen_width: screen_width.max(1.0),
            screen_height: screen_height.max(1.0),
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            fov_y: config.fov_y_degrees.to_radians(),
            smoothing: config.smoothing.clamp(0.0, 0.99),
            orbit_sensitivity: config.orbit_sensitivity,
            zoom_sensitivity: config.zoom_sensitivity,
            home: (azimuth, elevation, distance),
        }
    }

    /// Smoothly move the look-at point toward `goal`.
    /// Call once per frame with the simulation's camera target.
    pub fn follow(&mut self, goal: Vec3, dt: f32) {
        if self.smoothing <= 0.0 {
            self.target = goal;
        } else if dt > 0.0 {
            let t = 1.0 - self.smoothing.powf(dt * 60.0);
            self.target = self.target.lerp(goal, t);
        }
    }

    /// Orbit by a pointer drag delta in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.azimuth -= dx * self.orbit_sensitivity;
        self.elevation = (self.elevation + dy * self.orbit_sensitivity)
            .clamp(-MAX_ELEVATION, MAX_ELEVATION);
    }

    /// Zoom by a wheel delta (positive moves away).
    pub fn zoom(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.distance = (self.distance * (1.0 + delta * self.zoom_sensitivity))
            .clamp(self.min_distance, self.max_distance);
    }

    /// Back to the initial view around the origin.
    pub fn reset(&mut self) {
        (self.azimuth, self.elevation, self.distance) = self.home;
        self.target = Vec3::ZERO;
    }

    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.screen_width = width.max(1.0);
        self.screen_height = height.max(1.0);
    }

    pub fn distance_bounds(&self) -> (f32, f32) {
        (self.min_distance, self.max_distance)
    }

    /// Eye position in world space.
    pub fn position(&self) -> Vec3 {
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_el, cos_el) = self.elevation.sin_cos();
        self.target + Vec3::new(sin_az * cos_el, sin_el, cos_az * cos_el) * self.distance
    }

    fn aspect(&self) -> f32 {
        self.screen_width / self.screen_height
    }

    pub fn view_projection(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.position(), self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fov_y, self.aspect(), NEAR, FAR);
        proj * view
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_projection: self.view_projection().to_cols_array_2d(),
            eye: self.position().extend(1.0).to_array(),
        }
    }

    /// Project a world position to screen pixels. None if behind the eye.
    pub fn project(&self, world: Vec3) -> Option<Projection> {
        let eye = self.position();
        let forward = (self.target - eye).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);

        let rel = world - eye;
        let depth = rel.dot(forward);
        if depth <= NEAR {
            return None;
        }

        let focal = self.screen_height * 0.5 / (self.fov_y * 0.5).tan();
        let scale = focal / depth;
        let pos = Vec2::new(
            self.screen_width * 0.5 + rel.dot(right) * scale,
            self.screen_height * 0.5 - rel.dot(up) * scale,
        );
        Some(Projection { pos, depth, scale })
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(&CameraConfig::default(), 800.0, 600.0)
    }
}
