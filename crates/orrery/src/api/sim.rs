use glam::Vec3;

use crate::api::config::SimConfig;
use crate::bodies::{BodyRegistry, CelestialBody, Color};
use crate::core::focus::SelectionFocus;
use crate::core::orbit::{InitialPhases, OrbitEngine, OrbitState};
use crate::core::scale::{ScaleMode, ScalePolicy};
use crate::core::time::SimulationClock;
use crate::error::SimulationError;

/// Per-frame render data for one body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyRender<'a> {
    pub id: &'a str,
    /// Index into [`Simulation::list_bodies`].
    pub index: usize,
    /// World position. The star is always at the origin.
    pub position: Vec3,
    /// Render radius under the active scale mode.
    pub radius: f32,
    /// Orbit radius in render units (0 for the star).
    pub orbit_radius: f32,
    /// Axial spin angle in radians.
    pub spin: f32,
    pub color: Color,
    pub is_star: bool,
    pub selected: bool,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct RenderState<'a> {
    /// Bodies in display order.
    pub bodies: Vec<BodyRender<'a>>,
    pub camera_target: Vec3,
    pub scale_mode: ScaleMode,
    pub show_orbits: bool,
}

impl<'a> RenderState<'a> {
    pub fn get(&self, id: &str) -> Option<&BodyRender<'a>> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn star(&self) -> Option<&BodyRender<'a>> {
        self.bodies.iter().find(|b| b.is_star)
    }

    pub fn selected(&self) -> Option<&BodyRender<'a>> {
        self.bodies.iter().find(|b| b.selected)
    }
}

/// The simulation context. Owns the registry, clock, scale policy, orbit
/// states and selection, and is driven by one `tick` per rendered frame.
///
/// Nothing here is global: independent instances never share state.
#[derive(Debug, Clone)]
pub struct Simulation {
    registry: BodyRegistry,
    config: SimConfig,
    clock: SimulationClock,
    scale: ScalePolicy,
    orbits: OrbitEngine,
    focus: SelectionFocus,
    show_orbits: bool,
    elapsed: f64,
}

impl Simulation {
    /// Build a simulation with random initial phases seeded from `config.phase_seed`.
    pub fn new(registry: BodyRegistry, config: SimConfig) -> Result<Self, SimulationError> {
        let phases = InitialPhases::Random { seed: config.phase_seed };
        Self::with_phases(registry, config, &phases)
    }

    /// Build a simulation over the built-in Sun-to-Pluto catalog.
    pub fn builtin(config: SimConfig) -> Result<Self, SimulationError> {
        Self::new(BodyRegistry::builtin()?, config)
    }

    /// Build a simulation from a catalog JSON document.
    pub fn from_catalog_json(json: &str, config: SimConfig) -> Result<Self, SimulationError> {
        Self::new(BodyRegistry::from_json(json)?, config)
    }

    pub fn with_phases(
        registry: BodyRegistry,
        config: SimConfig,
        phases: &InitialPhases,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        let mut clock = SimulationClock::new(config.speed_min, config.speed_max, config.max_frame_dt);
        clock.set_speed(config.initial_speed);
        clock.set_paused(config.start_paused);

        let scale = ScalePolicy::new(config.initial_scale_mode, config.scale.clone());
        let orbits = OrbitEngine::new(&registry, config.base_angular_velocity, phases, &scale);

        let mut sim = Self {
            focus: SelectionFocus::new(config.retarget_delay),
            show_orbits: config.show_orbits,
            registry,
            clock,
            scale,
            orbits,
            elapsed: 0.0,
            config,
        };

        if let Some(id) = sim.config.initial_selection.clone() {
            sim.select(Some(id.as_str()));
        }

        log::info!(
            "simulation ready: {} bodies, {:?} scale, speed {}",
            sim.registry.len(),
            sim.scale.mode(),
            sim.clock.speed()
        );
        Ok(sim)
    }

    // -- Registry queries --

    /// All bodies in display order.
    pub fn list_bodies(&self) -> &[CelestialBody] {
        self.registry.list()
    }

    pub fn get_body(&self, id: &str) -> Option<&CelestialBody> {
        self.registry.get(id)
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    // -- Clock --

    pub fn set_paused(&mut self, paused: bool) {
        if self.clock.is_paused() != paused {
            log::debug!("clock: paused = {paused}");
        }
        self.clock.set_paused(paused);
    }

    pub fn toggle_pause(&mut self) -> bool {
        let paused = self.clock.toggle_pause();
        log::debug!("clock: paused = {paused}");
        paused
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Store a new speed multiplier, clamped to the configured bounds.
    /// Returns the value actually stored.
    pub fn set_speed_multiplier(&mut self, speed: f32) -> f32 {
        self.clock.set_speed(speed)
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.clock.speed()
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Real seconds that have been simulated (after delta clamping, excluding pauses).
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    // -- Scale --

    /// Switch scale mode. Positions and radii are re-derived immediately.
    pub fn set_scale_mode(&mut self, mode: ScaleMode) {
        if self.scale.set_mode(mode) {
            log::debug!("scale: {mode:?}");
            self.orbits.recompute_positions(&self.scale);
        }
    }

    /// Apply a numeric mode code from the UI. Unrecognized codes are ignored.
    /// Returns the mode in effect afterwards.
    pub fn set_scale_code(&mut self, code: f32) -> ScaleMode {
        match ScaleMode::from_code(code) {
            Some(mode) => self.set_scale_mode(mode),
            None => log::warn!("ignoring unknown scale mode code {code}"),
        }
        self.scale.mode()
    }

    pub fn toggle_scale_mode(&mut self) -> ScaleMode {
        self.set_scale_mode(self.scale.mode().toggled());
        self.scale.mode()
    }

    pub fn scale_mode(&self) -> ScaleMode {
        self.scale.mode()
    }

    pub fn scale(&self) -> &ScalePolicy {
        &self.scale
    }

    pub fn set_show_orbits(&mut self, show: bool) {
        self.show_orbits = show;
    }

    pub fn toggle_show_orbits(&mut self) -> bool {
        self.show_orbits = !self.show_orbits;
        self.show_orbits
    }

    pub fn show_orbits(&self) -> bool {
        self.show_orbits
    }

    // -- Selection --

    /// Select a body by id, or clear the selection with `None`.
    /// Unknown ids leave the selection unchanged and return false.
    pub fn select(&mut self, id: Option<&str>) -> bool {
        match id {
            None => {
                self.focus.deselect();
                true
            }
            Some(id) if self.registry.get(id).is_some() => {
                self.focus.select(id);
                true
            }
            Some(id) => {
                log::warn!("select: unknown body id {id:?}");
                false
            }
        }
    }

    pub fn selected(&self) -> Option<&CelestialBody> {
        self.focus.selected().and_then(|id| self.registry.get(id))
    }

    pub fn focus(&self) -> &SelectionFocus {
        &self.focus
    }

    /// Current camera focus target.
    pub fn camera_target(&self) -> Vec3 {
        self.focus.target()
    }

    // -- Per-frame --

    /// Advance one frame. `frame_dt` is the raw frame delta in seconds; it is
    /// clamped before use. While paused, phases hold still but the focus
    /// transition keeps running on real time.
    pub fn tick(&mut self, frame_dt: f32) {
        let dt = self.clock.clamp_delta(frame_dt);

        if !self.clock.is_paused() {
            self.orbits.advance(dt as f64, self.clock.speed() as f64, &self.scale);
            self.elapsed += dt as f64;
        }

        let orbits = &self.orbits;
        let star = self.registry.star().id.as_str();
        self.focus.tick(dt, |id| {
            if id == star {
                Some(Vec3::ZERO)
            } else {
                orbits.get(id).map(OrbitState::position)
            }
        });
    }

    pub fn orbits(&self) -> &OrbitEngine {
        &self.orbits
    }

    pub fn orbit_state(&self, id: &str) -> Option<&OrbitState> {
        self.orbits.get(id)
    }

    /// Jump a body to a phase angle (radians). Returns false for the star or unknown ids.
    pub fn set_phase(&mut self, id: &str, phase: f64) -> bool {
        self.orbits.set_phase(id, phase, &self.scale)
    }

    /// Live world position of a body. The star is at the origin.
    pub fn position_of(&self, id: &str) -> Option<Vec3> {
        let body = self.registry.get(id)?;
        if body.is_star() {
            return Some(Vec3::ZERO);
        }
        self.orbits.get(id).map(OrbitState::position)
    }

    /// Render radius of a body under the active scale mode.
    pub fn radius_of(&self, body: &CelestialBody) -> f32 {
        let radius = if body.is_star() {
            self.scale.star_radius(body.diameter)
        } else {
            self.scale.radius_for_diameter(body.diameter)
        };
        radius as f32
    }

    pub fn render_state(&self) -> RenderState<'_> {
        let selected = self.focus.selected();
        let bodies = self
            .registry
            .list()
            .iter()
            .enumerate()
            .map(|(index, body)| {
                let (position, orbit_radius, spin) = match self.orbits.get(&body.id) {
                    Some(state) => (state.position(), state.orbit_radius() as f32, state.spin() as f32),
                    None => (Vec3::ZERO, 0.0, self.orbits.star_spin() as f32),
                };
                BodyRender {
                    id: body.id.as_str(),
                    index,
                    position,
                    radius: self.radius_of(body),
                    orbit_radius,
                    spin,
                    color: body.rgb().unwrap_or(Color::WHITE),
                    is_star: body.is_star(),
                    selected: selected == Some(body.id.as_str()),
                }
            })
            .collect();

        RenderState {
            bodies,
            camera_target: self.focus.target(),
            scale_mode: self.scale.mode(),
            show_orbits: self.show_orbits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::Classification;
    use crate::error::ConfigError;
    use std::collections::HashMap;

    const DT: f32 = 1.0 / 60.0;

    fn sim() -> Simulation {
        Simulation::builtin(SimConfig::default()).unwrap()
    }

    fn phases(sim: &Simulation) -> Vec<f64> {
        sim.orbits().states().iter().map(|s| s.phase()).collect()
    }

    #[test]
    fn get_body_finds_pluto_and_rejects_unknown() {
        let sim = sim();
        assert_eq!(sim.get_body("pluto").unwrap().classification, Classification::DwarfPlanet);
        assert!(sim.get_body("unknown").is_none());
        assert_eq!(sim.list_bodies().len(), 10);
    }

    #[test]
    fn starts_with_configured_selection() {
        let sim = sim();
        assert_eq!(sim.selected().map(|b| b.id.as_str()), Some("earth"));
        assert_eq!(sim.camera_target(), Vec3::ZERO);
        assert!(!sim.is_paused());
        assert!(sim.show_orbits());
    }

    #[test]
    fn unknown_initial_selection_starts_unfocused() {
        let config = SimConfig { initial_selection: Some("vulcan".into()), ..SimConfig::default() };
        let sim = Simulation::builtin(config).unwrap();
        assert!(sim.selected().is_none());
    }

    #[test]
    fn invalid_config_refuses_to_start() {
        let config = SimConfig { speed_min: 3.0, speed_max: 2.0, ..SimConfig::default() };
        let err = Simulation::builtin(config).unwrap_err();
        assert!(matches!(err, SimulationError::Config(ConfigError::InvalidSpeedBounds { .. })));
    }

    #[test]
    fn invalid_catalog_refuses_to_start() {
        let err = Simulation::from_catalog_json("{\"bodies\": []}", SimConfig::default()).unwrap_err();
        assert!(matches!(err, SimulationError::Registry(_)));
    }

    #[test]
    fn speed_is_clamped_not_rejected() {
        let mut sim = sim();
        assert_eq!(sim.set_speed_multiplier(-5.0), 0.1);
        assert_eq!(sim.set_speed_multiplier(999.0), 10.0);
        assert_eq!(sim.speed_multiplier(), 10.0);
    }

    #[test]
    fn pause_holds_phase_and_resume_continues() {
        let mut sim = sim();
        sim.tick(DT);
        let before = phases(&sim);

        sim.set_paused(true);
        for _ in 0..100 {
            sim.tick(DT);
        }
        assert_eq!(phases(&sim), before);

        sim.set_paused(false);
        sim.tick(DT);
        for (state, start) in sim.orbits().states().iter().zip(&before) {
            let expected = crate::core::orbit::normalize_angle(start + state.angular_velocity() * DT as f64);
            assert!((state.phase() - expected).abs() < 1e-9, "{}", state.body_id());
        }
    }

    #[test]
    fn large_frame_delta_is_clamped() {
        let mut a = sim();
        let mut b = sim();
        a.tick(5.0);
        b.tick(0.1);
        assert_eq!(phases(&a), phases(&b));
        assert!((a.elapsed() - 0.1).abs() < 1e-7);
    }

    #[test]
    fn scale_switch_applies_same_tick() {
        let mut sim = sim();
        let phase = sim.orbit_state("jupiter").unwrap().phase();
        {
            let state = sim.render_state();
            let jupiter = state.get("jupiter").unwrap();
            assert!((jupiter.orbit_radius - 7.786).abs() < 1e-5);
            assert!((jupiter.radius - 142984.0 / 12756.0 * 0.1).abs() < 1e-5);
            assert_eq!(state.star().unwrap().radius, 0.5);
        }

        sim.set_scale_mode(ScaleMode::Realistic);
        let after = sim.render_state();
        let jupiter = after.get("jupiter").unwrap();
        assert!((jupiter.orbit_radius - 23.358).abs() < 1e-4);
        assert!((jupiter.position.length() - 23.358).abs() < 1e-4);
        assert!((jupiter.radius - 71492.0 * 3.0e-8).abs() < 1e-7);
        assert!((after.star().unwrap().radius - 696350.0 * 3.0e-8).abs() < 1e-6);
        assert_eq!(sim.orbit_state("jupiter").unwrap().phase(), phase);
        assert_eq!(after.scale_mode, ScaleMode::Realistic);
    }

    #[test]
    fn unknown_scale_code_is_ignored() {
        let mut sim = sim();
        assert_eq!(sim.set_scale_code(7.0), ScaleMode::Compressed);
        assert_eq!(sim.set_scale_code(1.0), ScaleMode::Realistic);
        assert_eq!(sim.set_scale_code(f32::NAN), ScaleMode::Realistic);
        assert_eq!(sim.toggle_scale_mode(), ScaleMode::Compressed);
    }

    #[test]
    fn select_latest_wins_and_tracks_live_position() {
        let mut sim = sim();
        assert!(sim.select(Some("mars")));
        sim.tick(DT);
        assert!(sim.select(Some("saturn")));
        for _ in 0..30 {
            sim.tick(DT);
        }
        let saturn = sim.position_of("saturn").unwrap();
        assert_eq!(sim.camera_target(), saturn);
        assert_ne!(sim.camera_target(), sim.position_of("mars").unwrap());

        // Keeps following as the body moves
        sim.tick(DT);
        assert_eq!(sim.camera_target(), sim.position_of("saturn").unwrap());
    }

    #[test]
    fn select_unknown_keeps_current() {
        let mut sim = sim();
        assert!(!sim.select(Some("unknown")));
        assert_eq!(sim.selected().map(|b| b.id.as_str()), Some("earth"));
    }

    #[test]
    fn deselect_and_star_selection_target_origin() {
        let mut sim = sim();
        for _ in 0..10 {
            sim.tick(DT);
        }
        assert_ne!(sim.camera_target(), Vec3::ZERO);

        assert!(sim.select(None));
        assert!(sim.selected().is_none());
        assert_eq!(sim.camera_target(), Vec3::ZERO);

        sim.select(Some("sun"));
        for _ in 0..10 {
            sim.tick(DT);
        }
        assert_eq!(sim.camera_target(), Vec3::ZERO);
    }

    #[test]
    fn render_state_places_star_at_origin() {
        let mut explicit = HashMap::new();
        explicit.insert("earth".to_string(), 0.0);
        let sim = Simulation::with_phases(
            BodyRegistry::builtin().unwrap(),
            SimConfig::default(),
            &InitialPhases::explicit(explicit),
        )
        .unwrap();

        let state = sim.render_state();
        assert_eq!(state.bodies.len(), 10);
        let sun = state.star().unwrap();
        assert_eq!(sun.position, Vec3::ZERO);
        assert_eq!(sun.radius, 0.5);

        let earth = state.get("earth").unwrap();
        assert!(earth.selected);
        assert!((earth.radius - 0.1).abs() < 1e-6);
        assert!((earth.position.z - 1.496).abs() < 1e-5);
        assert_eq!(state.selected().map(|b| b.id), Some("earth"));
    }

    #[test]
    fn independent_instances_do_not_share_state() {
        let mut a = sim();
        let b = sim();
        a.set_paused(true);
        a.set_speed_multiplier(5.0);
        assert!(!b.is_paused());
        assert_eq!(b.speed_multiplier(), 1.0);
    }
}
