//! Circular-orbit kinematics: one phase angle per orbiting body, advanced
//! every tick, with the position derived from the phase and the active scale.
//!
//! Phases are accumulated in f64; positions are converted to f32 only at the
//! final step.

use std::collections::HashMap;
use std::f64::consts::TAU;

use glam::Vec3;

use crate::bodies::BodyRegistry;
use crate::core::rng::Rng;
use crate::core::scale::ScalePolicy;

/// Axial spin in radians per second at speed 1.
pub const SPIN_RATE: f64 = 0.5;
/// The star's spin in radians per second, independent of speed.
pub const STAR_SPIN_RATE: f64 = 0.05;

/// How orbit phases are seeded at scene initialization.
#[derive(Debug, Clone)]
pub enum InitialPhases {
    /// Uniformly random phases from a seeded generator.
    Random { seed: u64 },
    /// Fixed phases by body id (radians). Unlisted bodies draw from the
    /// seeded generator as if no phase were pinned.
    Explicit { phases: HashMap<String, f64>, seed: u64 },
}

impl InitialPhases {
    pub const DEFAULT_SEED: u64 = 0x5EED_0F_0B17;

    /// Pin the given phases; everything else gets the default seeded layout.
    pub fn explicit(phases: HashMap<String, f64>) -> Self {
        Self::Explicit { phases, seed: Self::DEFAULT_SEED }
    }
}

impl Default for InitialPhases {
    fn default() -> Self {
        Self::Random { seed: Self::DEFAULT_SEED }
    }
}

/// Wrap an angle into [0, 2π).
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Point on a circular orbit in the shared XZ plane.
#[inline]
pub fn orbit_position(phase: f64, radius: f64) -> Vec3 {
    Vec3::new((phase.sin() * radius) as f32, 0.0, (phase.cos() * radius) as f32)
}

/// Mutable kinematic state for one orbiting body.
#[derive(Debug, Clone)]
pub struct OrbitState {
    body_id: String,
    /// Display index into the registry.
    body_index: usize,
    /// Radians per second at speed 1 (negative = retrograde orbit).
    angular_velocity: f64,
    /// Distance from the star in millions of km.
    distance: f64,
    spin_direction: f64,
    phase: f64,
    spin: f64,
    orbit_radius: f64,
    position: Vec3,
}

impl OrbitState {
    pub fn body_id(&self) -> &str {
        &self.body_id
    }

    pub fn body_index(&self) -> usize {
        self.body_index
    }

    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// Current phase angle in [0, 2π).
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Axial spin angle in [0, 2π).
    pub fn spin(&self) -> f64 {
        self.spin
    }

    /// Orbit radius in render units under the scale it was last derived with.
    pub fn orbit_radius(&self) -> f64 {
        self.orbit_radius
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    fn derive(&mut self, scale: &ScalePolicy) {
        self.orbit_radius = scale.radius_for_distance(self.distance);
        self.position = orbit_position(self.phase, self.orbit_radius);
    }
}

/// Owns every [`OrbitState`] and advances them per tick.
#[derive(Debug, Clone)]
pub struct OrbitEngine {
    states: Vec<OrbitState>,
    lookup: HashMap<String, usize>,
    star_spin: f64,
}

impl OrbitEngine {
    /// Create one state per orbiting body, with positions derived under `scale`.
    ///
    /// `base_angular_velocity` is in radians·days per second: a body with
    /// period P days advances `base / P` radians per second at speed 1.
    pub fn new(
        registry: &BodyRegistry,
        base_angular_velocity: f64,
        phases: &InitialPhases,
        scale: &ScalePolicy,
    ) -> Self {
        let (seed, pinned) = match phases {
            InitialPhases::Random { seed } => (*seed, None),
            InitialPhases::Explicit { phases, seed } => (*seed, Some(phases)),
        };
        let mut rng = Rng::new(seed);

        let mut states = Vec::with_capacity(registry.len());
        let mut lookup = HashMap::with_capacity(registry.len());

        for (index, body) in registry.list().iter().enumerate() {
            if body.is_star() {
                continue;
            }
            // Registry validation rejects orbiting bodies without a period
            let Some(period) = body.orbital_period else {
                continue;
            };

            // Draw for every body so pinning one leaves the others where they were
            let drawn = rng.next_angle();
            let phase = pinned
                .and_then(|map| map.get(&body.id))
                .map_or(drawn, |&p| normalize_angle(p));

            let mut state = OrbitState {
                body_id: body.id.clone(),
                body_index: index,
                angular_velocity: base_angular_velocity / period,
                distance: body.distance_from_sun,
                spin_direction: body.spin_direction(),
                phase,
                spin: 0.0,
                orbit_radius: 0.0,
                position: Vec3::ZERO,
            };
            state.derive(scale);

            lookup.insert(body.id.clone(), states.len());
            states.push(state);
        }

        Self { states, lookup, star_spin: 0.0 }
    }

    /// Advance every body by `dt` seconds at `speed`. Callers skip this while paused.
    pub fn advance(&mut self, dt: f64, speed: f64, scale: &ScalePolicy) {
        if dt <= 0.0 {
            return;
        }
        let sim_dt = dt * speed;
        for state in &mut self.states {
            state.phase = normalize_angle(state.phase + state.angular_velocity * sim_dt);
            state.spin = normalize_angle(state.spin + SPIN_RATE * sim_dt * state.spin_direction);
            state.derive(scale);
        }
        self.star_spin = normalize_angle(self.star_spin + STAR_SPIN_RATE * dt);
    }

    /// Re-derive every position from its phase, e.g. right after a scale switch.
    pub fn recompute_positions(&mut self, scale: &ScalePolicy) {
        for state in &mut self.states {
            state.derive(scale);
        }
    }

    /// Jump a body to a phase. Returns false for unknown or non-orbiting ids.
    pub fn set_phase(&mut self, id: &str, phase: f64, scale: &ScalePolicy) -> bool {
        match self.lookup.get(id) {
            Some(&i) => {
                let state = &mut self.states[i];
                state.phase = normalize_angle(phase);
                state.derive(scale);
                true
            }
            None => false,
        }
    }

    pub fn states(&self) -> &[OrbitState] {
        &self.states
    }

    pub fn get(&self, id: &str) -> Option<&OrbitState> {
        self.lookup.get(id).map(|&i| &self.states[i])
    }

    pub fn star_spin(&self) -> f64 {
        self.star_spin
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scale::ScaleMode;

    const BASE: f64 = TAU * 20.0;
    const EPS: f64 = 1e-6;

    fn zero_phases() -> InitialPhases {
        let registry = BodyRegistry::builtin().unwrap();
        InitialPhases::explicit(registry.planets().map(|b| (b.id.clone(), 0.0)).collect())
    }

    /// Shortest distance between two angles.
    fn angle_diff(a: f64, b: f64) -> f64 {
        let d = normalize_angle(a - b);
        d.min(TAU - d)
    }

    fn engine(phases: &InitialPhases) -> (BodyRegistry, ScalePolicy, OrbitEngine) {
        let registry = BodyRegistry::builtin().unwrap();
        let scale = ScalePolicy::default();
        let engine = OrbitEngine::new(&registry, BASE, phases, &scale);
        (registry, scale, engine)
    }

    #[test]
    fn one_state_per_orbiting_body() {
        let (_, _, engine) = engine(&zero_phases());
        assert_eq!(engine.len(), 9);
        assert!(engine.get("sun").is_none());
        assert_eq!(engine.get("earth").unwrap().body_index(), 3);
    }

    #[test]
    fn normalize_wraps_into_range() {
        assert!((normalize_angle(TAU + 1.0) - 1.0).abs() < 1e-12);
        assert!((normalize_angle(-1.0) - (TAU - 1.0)).abs() < 1e-12);
        assert_eq!(normalize_angle(-1e-18), 0.0);
        assert_eq!(normalize_angle(f64::NAN), 0.0);
    }

    #[test]
    fn phase_accumulates_linearly() {
        let (_, scale, mut engine) = engine(&zero_phases());
        let (d, s, n) = (1.0 / 60.0, 3.0, 500);
        for _ in 0..n {
            engine.advance(d, s, &scale);
        }
        for state in engine.states() {
            let expected = normalize_angle(state.angular_velocity() * d * s * n as f64);
            assert!(
                angle_diff(state.phase(), expected) < EPS,
                "{}: phase {} expected {}",
                state.body_id(),
                state.phase(),
                expected
            );
        }
    }

    #[test]
    fn earth_returns_after_one_year() {
        let (_, scale, mut engine) = engine(&zero_phases());
        let start = engine.get("earth").unwrap().phase();
        // One orbit takes TAU / (BASE / 365.2) seconds at speed 1
        let year = TAU * 365.2 / BASE;
        let ticks = 1000;
        for _ in 0..ticks {
            engine.advance(year / ticks as f64, 1.0, &scale);
        }
        let end = engine.get("earth").unwrap().phase();
        assert!(angle_diff(start, end) < EPS, "start {start} end {end}");
    }

    #[test]
    fn zero_dt_keeps_phase() {
        let (_, scale, mut engine) = engine(&InitialPhases::Random { seed: 7 });
        let before: Vec<f64> = engine.states().iter().map(|s| s.phase()).collect();
        engine.advance(0.0, 5.0, &scale);
        let after: Vec<f64> = engine.states().iter().map(|s| s.phase()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn bodies_stay_on_their_circle() {
        let (registry, scale, mut engine) = engine(&InitialPhases::Random { seed: 99 });
        for _ in 0..240 {
            engine.advance(1.0 / 60.0, 10.0, &scale);
            for state in engine.states() {
                let body = &registry.list()[state.body_index()];
                let r = scale.radius_for_distance(body.distance_from_sun);
                let len = state.position().length() as f64;
                assert!((len - r).abs() < r * 1e-5, "{} off orbit", state.body_id());
                assert_eq!(state.position().y, 0.0);
            }
        }
    }

    #[test]
    fn position_follows_sin_cos_convention() {
        let mut phases = HashMap::new();
        phases.insert("earth".to_string(), std::f64::consts::FRAC_PI_2);
        phases.insert("mars".to_string(), 0.0);
        let (_, _, engine) = engine(&InitialPhases::explicit(phases));
        let earth = engine.get("earth").unwrap().position();
        assert!((earth.x - 1.496).abs() < 1e-5);
        assert!(earth.z.abs() < 1e-5);

        let mars = engine.get("mars").unwrap().position();
        assert!(mars.x.abs() < 1e-6);
        assert!((mars.z - 2.279).abs() < 1e-5);
    }

    #[test]
    fn scale_switch_rederives_without_touching_phase() {
        let (_, mut scale, mut engine) = engine(&InitialPhases::Random { seed: 3 });
        let phase = engine.get("jupiter").unwrap().phase();
        let compressed_r = engine.get("jupiter").unwrap().orbit_radius();

        scale.set_mode(ScaleMode::Realistic);
        engine.recompute_positions(&scale);

        let jupiter = engine.get("jupiter").unwrap();
        assert_eq!(jupiter.phase(), phase);
        assert!((compressed_r - 7.786).abs() < 1e-9);
        assert!((jupiter.orbit_radius() - 23.358).abs() < 1e-9);
        assert!(((jupiter.position().length() as f64) - 23.358).abs() < 1e-4);

        scale.set_mode(ScaleMode::Compressed);
        engine.recompute_positions(&scale);
        assert!((engine.get("jupiter").unwrap().orbit_radius() - compressed_r).abs() < 1e-12);
    }

    #[test]
    fn pinned_phase_leaves_others_seeded() {
        let mut pinned = HashMap::new();
        pinned.insert("earth".to_string(), 1.0);
        let (_, _, mixed) = engine(&InitialPhases::Explicit { phases: pinned, seed: 21 });
        let (_, _, seeded) = engine(&InitialPhases::Random { seed: 21 });

        assert!((mixed.get("earth").unwrap().phase() - 1.0).abs() < 1e-12);
        assert_ne!(seeded.get("earth").unwrap().phase(), 1.0);
        for state in mixed.states().iter().filter(|s| s.body_id() != "earth") {
            assert_eq!(state.phase(), seeded.get(state.body_id()).unwrap().phase());
        }
        // Unlisted bodies are not parked at zero
        assert!(mixed.states().iter().filter(|s| s.phase() != 0.0).count() >= 8);
    }

    #[test]
    fn random_phases_reproducible_by_seed() {
        let (_, _, a) = engine(&InitialPhases::Random { seed: 11 });
        let (_, _, b) = engine(&InitialPhases::Random { seed: 11 });
        let (_, _, c) = engine(&InitialPhases::Random { seed: 12 });
        let phases = |e: &OrbitEngine| e.states().iter().map(|s| s.phase()).collect::<Vec<_>>();
        assert_eq!(phases(&a), phases(&b));
        assert_ne!(phases(&a), phases(&c));
    }

    #[test]
    fn shorter_periods_move_faster() {
        let (_, _, engine) = engine(&zero_phases());
        let mercury = engine.get("mercury").unwrap().angular_velocity();
        let neptune = engine.get("neptune").unwrap().angular_velocity();
        assert!(mercury > neptune);
    }

    #[test]
    fn retrograde_rotation_spins_backwards() {
        let (_, scale, mut engine) = engine(&zero_phases());
        engine.advance(0.1, 1.0, &scale);
        // Venus rotates retrograde, Earth prograde
        let venus = engine.get("venus").unwrap().spin();
        let earth = engine.get("earth").unwrap().spin();
        assert!((earth - SPIN_RATE * 0.1).abs() < 1e-9);
        assert!((venus - (TAU - SPIN_RATE * 0.1)).abs() < 1e-9);
        assert!((engine.star_spin() - STAR_SPIN_RATE * 0.1).abs() < 1e-9);
    }

    #[test]
    fn set_phase_jumps_and_rejects_star() {
        let (_, scale, mut engine) = engine(&zero_phases());
        assert!(engine.set_phase("mars", 7.0, &scale));
        assert!((engine.get("mars").unwrap().phase() - (7.0 - TAU)).abs() < 1e-12);
        assert!(!engine.set_phase("sun", 1.0, &scale));
    }
}
