//! WASM exports for the orrery.
//!
//! One [`SimulationRunner`] lives in thread-local storage. The host page calls
//! `orrery_init` once, then `orrery_tick(dt)` every animation frame, and reads
//! the instance, orbit and event buffers straight out of linear memory.

pub mod runner;

pub use runner::{load_config, SimulationRunner};

use std::cell::RefCell;

use orrery::{BodyInstance, BodyRegistry, InputEvent, OrbitVertex, SimEvent, Simulation};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SimulationRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner. Returns None before `orrery_init`.
fn with_runner<R>(f: impl FnOnce(&mut SimulationRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("orrery not initialized; call orrery_init() first");
                None
            }
        }
    })
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Start the simulation. `catalog_json` replaces the built-in Sun-to-Pluto
/// catalog; `config_json` overrides any config fields it names.
/// Refuses to start on invalid data.
#[wasm_bindgen]
pub fn orrery_init(
    catalog_json: Option<String>,
    config_json: Option<String>,
    width: f32,
    height: f32,
) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // A logger is already installed on re-init; the log macros keep using it
        web_sys::console::debug_1(&JsValue::from_str("orrery: logger already initialized"));
    }

    let config = load_config(config_json.as_deref(), random_seed).map_err(to_js)?;
    let registry = match catalog_json.as_deref() {
        Some(json) => BodyRegistry::from_json(json),
        None => BodyRegistry::builtin(),
    }
    .map_err(to_js)?;
    let sim = Simulation::new(registry, config).map_err(to_js)?;

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(SimulationRunner::new(sim, width, height));
    });
    log::info!("orrery: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn orrery_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

// ---- Input ----

#[wasm_bindgen]
pub fn orrery_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn orrery_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn orrery_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn orrery_wheel(delta: f32) {
    with_runner(|r| r.push_input(InputEvent::Wheel { delta }));
}

#[wasm_bindgen]
pub fn orrery_custom_event(kind: u32, a: f32, b: f32, c: f32) {
    with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
}

// ---- Direct controls ----

#[wasm_bindgen]
pub fn orrery_set_paused(paused: bool) {
    with_runner(|r| r.sim_mut().set_paused(paused));
}

/// Returns the stored (clamped) multiplier.
#[wasm_bindgen]
pub fn orrery_set_speed(speed: f32) -> f32 {
    with_runner(|r| r.sim_mut().set_speed_multiplier(speed)).unwrap_or(0.0)
}

/// Returns the mode code in effect afterwards.
#[wasm_bindgen]
pub fn orrery_set_scale_mode(code: f32) -> f32 {
    with_runner(|r| r.sim_mut().set_scale_code(code).code()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn orrery_set_show_orbits(show: bool) {
    with_runner(|r| r.sim_mut().set_show_orbits(show));
}

/// Select by id, or clear with `undefined`. False for unknown ids.
#[wasm_bindgen]
pub fn orrery_select(id: Option<String>) -> bool {
    with_runner(|r| r.sim_mut().select(id.as_deref())).unwrap_or(false)
}

// ---- Registry queries ----

/// All bodies in display order, as a JSON array.
#[wasm_bindgen]
pub fn orrery_list_bodies() -> Result<String, JsValue> {
    with_runner(|r| serde_json::to_string(r.sim().list_bodies()))
        .unwrap_or_else(|| Ok("[]".to_string()))
        .map_err(to_js)
}

/// One body as JSON, or `undefined` if the id is unknown.
#[wasm_bindgen]
pub fn orrery_get_body(id: &str) -> Result<Option<String>, JsValue> {
    let json = with_runner(|r| r.sim().get_body(id).map(serde_json::to_string)).flatten();
    json.transpose().map_err(to_js)
}

#[wasm_bindgen]
pub fn orrery_selected_id() -> Option<String> {
    with_runner(|r| r.sim().selected().map(|b| b.id.clone())).flatten()
}

#[wasm_bindgen]
pub fn orrery_speed_presets() -> Vec<f32> {
    with_runner(|r| r.sim().config().speed_presets.clone()).unwrap_or_default()
}

// ---- Buffer accessors ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_instance_floats() -> u32 {
    BodyInstance::FLOATS as u32
}

#[wasm_bindgen]
pub fn get_glow_start() -> u32 {
    with_runner(|r| r.glow_start()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_orbit_vertices_ptr() -> *const f32 {
    with_runner(|r| r.orbit_vertices_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_orbit_vertex_count() -> u32 {
    with_runner(|r| r.orbit_vertex_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_orbit_vertex_floats() -> u32 {
    OrbitVertex::FLOATS as u32
}

#[wasm_bindgen]
pub fn get_ring_stride() -> u32 {
    with_runner(|r| r.ring_stride()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_event_floats() -> u32 {
    SimEvent::FLOATS as u32
}

/// View-projection matrix (16 floats, column-major) followed by the eye (4 floats).
#[wasm_bindgen]
pub fn get_camera_ptr() -> *const f32 {
    with_runner(|r| r.camera_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_camera_eye() -> Vec<f32> {
    with_runner(|r| r.camera_eye().to_array().to_vec()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_camera_target() -> Vec<f32> {
    with_runner(|r| r.camera_target().to_array().to_vec()).unwrap_or_default()
}
