//! Maps astronomical magnitudes (km, millions of km) into render units.
//!
//! Compressed mode keeps every body and orbit legible at once. Realistic mode
//! applies one tiny linear factor to both radii and distances, so orbits
//! spread out while the bodies themselves shrink below a pixel.

use serde::{Deserialize, Serialize};

/// Active scale mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    #[default]
    Compressed,
    Realistic,
}

impl ScaleMode {
    /// Decode a numeric mode from the UI layer (0 = compressed, 1 = realistic).
    /// Anything else is unrecognized.
    pub fn from_code(code: f32) -> Option<Self> {
        if code == 0.0 {
            Some(Self::Compressed)
        } else if code == 1.0 {
            Some(Self::Realistic)
        } else {
            None
        }
    }

    pub fn code(self) -> f32 {
        match self {
            Self::Compressed => 0.0,
            Self::Realistic => 1.0,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Compressed => Self::Realistic,
            Self::Realistic => Self::Compressed,
        }
    }
}

/// Tunable scale constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleParams {
    /// Reference diameter (km) that maps to `compressed_unit_radius`.
    pub earth_diameter: f64,
    /// Render radius of an Earth-sized body in compressed mode.
    pub compressed_unit_radius: f64,
    /// Render units per million km in compressed mode.
    pub compressed_distance_factor: f64,
    /// Fixed star radius in compressed mode (a proportional Sun would swallow Mercury).
    pub compressed_star_radius: f64,
    /// Render units per km in realistic mode, for radii and distances alike.
    /// At the default, realistic orbits are three times the compressed ones.
    pub realistic_factor: f64,
}

impl Default for ScaleParams {
    fn default() -> Self {
        Self {
            earth_diameter: 12756.0,
            compressed_unit_radius: 0.1,
            compressed_distance_factor: 0.01,
            compressed_star_radius: 0.5,
            realistic_factor: 3.0e-8,
        }
    }
}

impl ScaleParams {
    /// Names the first non-positive or non-finite factor, if any.
    pub fn invalid_field(&self) -> Option<(&'static str, f64)> {
        [
            ("scale.earth_diameter", self.earth_diameter),
            ("scale.compressed_unit_radius", self.compressed_unit_radius),
            ("scale.compressed_distance_factor", self.compressed_distance_factor),
            ("scale.compressed_star_radius", self.compressed_star_radius),
            ("scale.realistic_factor", self.realistic_factor),
        ]
        .into_iter()
        .find(|&(_, v)| !(v.is_finite() && v > 0.0))
    }
}

const KM_PER_MILLION_KM: f64 = 1.0e6;

/// Scale mode plus its parameters. Pure functions of the current mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalePolicy {
    mode: ScaleMode,
    params: ScaleParams,
}

impl ScalePolicy {
    pub fn new(mode: ScaleMode, params: ScaleParams) -> Self {
        Self { mode, params }
    }

    pub fn mode(&self) -> ScaleMode {
        self.mode
    }

    /// Switch mode. Returns true if the mode actually changed.
    pub fn set_mode(&mut self, mode: ScaleMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    pub fn params(&self) -> &ScaleParams {
        &self.params
    }

    /// Render radius for a body of the given diameter (km).
    pub fn radius_for_diameter(&self, diameter: f64) -> f64 {
        match self.mode {
            ScaleMode::Compressed => {
                diameter / self.params.earth_diameter * self.params.compressed_unit_radius
            }
            ScaleMode::Realistic => diameter * 0.5 * self.params.realistic_factor,
        }
    }

    /// Render orbit radius for a distance from the star (millions of km).
    pub fn radius_for_distance(&self, distance: f64) -> f64 {
        match self.mode {
            ScaleMode::Compressed => distance * self.params.compressed_distance_factor,
            ScaleMode::Realistic => distance * KM_PER_MILLION_KM * self.params.realistic_factor,
        }
    }

    /// Render radius for the star.
    pub fn star_radius(&self, diameter: f64) -> f64 {
        match self.mode {
            ScaleMode::Compressed => self.params.compressed_star_radius,
            ScaleMode::Realistic => self.radius_for_diameter(diameter),
        }
    }
}

impl Default for ScalePolicy {
    fn default() -> Self {
        Self::new(ScaleMode::Compressed, ScaleParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn compressed_earth_is_unit_radius() {
        let policy = ScalePolicy::default();
        assert!((policy.radius_for_diameter(12756.0) - 0.1).abs() < EPS);
        assert!((policy.radius_for_distance(149.6) - 1.496).abs() < EPS);
        assert_eq!(policy.star_radius(1392700.0), 0.5);
    }

    #[test]
    fn realistic_preserves_proportions() {
        let policy = ScalePolicy::new(ScaleMode::Realistic, ScaleParams::default());
        let earth_r = policy.radius_for_diameter(12756.0);
        let earth_orbit = policy.radius_for_distance(149.6);
        // True ratio: 149.6e6 km / 6378 km
        let ratio = earth_orbit / earth_r;
        assert!((ratio - 149.6e6 / 6378.0).abs() / ratio < 1e-9);
        // The star is proportional too
        let sun_r = policy.star_radius(1392700.0);
        assert!((sun_r / earth_r - 1392700.0 / 12756.0).abs() < 1e-6);
    }

    #[test]
    fn modes_produce_distinct_magnitudes() {
        let compressed = ScalePolicy::default();
        let realistic = ScalePolicy::new(ScaleMode::Realistic, ScaleParams::default());

        assert!((compressed.radius_for_distance(778.6) - 7.786).abs() < EPS);
        assert!((realistic.radius_for_distance(778.6) - 23.358).abs() < EPS);

        assert!((compressed.radius_for_diameter(142984.0) - 142984.0 / 12756.0 * 0.1).abs() < EPS);
        assert!((realistic.radius_for_diameter(142984.0) - 71492.0 * 3.0e-8).abs() < 1e-15);

        assert_eq!(compressed.star_radius(1392700.0), 0.5);
        assert!((realistic.star_radius(1392700.0) - 696350.0 * 3.0e-8).abs() < 1e-15);
    }

    #[test]
    fn realistic_planets_are_tiny() {
        let compressed = ScalePolicy::default();
        let realistic = ScalePolicy::new(ScaleMode::Realistic, ScaleParams::default());
        assert!(realistic.radius_for_diameter(4879.0) < compressed.radius_for_diameter(4879.0) / 100.0);
    }

    #[test]
    fn mode_codes() {
        assert_eq!(ScaleMode::from_code(0.0), Some(ScaleMode::Compressed));
        assert_eq!(ScaleMode::from_code(1.0), Some(ScaleMode::Realistic));
        assert_eq!(ScaleMode::from_code(2.0), None);
        assert_eq!(ScaleMode::from_code(f32::NAN), None);
        assert_eq!(ScaleMode::Realistic.toggled(), ScaleMode::Compressed);
    }

    #[test]
    fn set_mode_reports_change() {
        let mut policy = ScalePolicy::default();
        assert!(!policy.set_mode(ScaleMode::Compressed));
        assert!(policy.set_mode(ScaleMode::Realistic));
        assert_eq!(policy.mode(), ScaleMode::Realistic);
    }

    #[test]
    fn invalid_params_detected() {
        assert!(ScaleParams::default().invalid_field().is_none());
        let params = ScaleParams { realistic_factor: 0.0, ..Default::default() };
        assert_eq!(params.invalid_field(), Some(("scale.realistic_factor", 0.0)));
    }
}
