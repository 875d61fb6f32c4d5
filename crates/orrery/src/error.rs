use thiserror::Error;

/// A body definition violates a registry invariant.
/// Raised while loading the catalog; the simulation refuses to start.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The catalog JSON could not be parsed.
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The catalog contains no bodies at all.
    #[error("catalog is empty")]
    Empty,

    /// Two bodies share the same id.
    #[error("duplicate body id: {0}")]
    DuplicateId(String),

    /// No body is classified as a star.
    #[error("catalog has no star")]
    MissingStar,

    /// More than one body is classified as a star.
    #[error("catalog has more than one star: {first} and {second}")]
    MultipleStars { first: String, second: String },

    /// An orbiting body has a zero, missing or non-finite orbital period.
    #[error("body {0} orbits but has no usable orbital period")]
    MissingOrbitalPeriod(String),

    #[error("body {id} has non-positive diameter {value}")]
    NonPositiveDiameter { id: String, value: f64 },

    #[error("body {id} has non-positive mass {value}")]
    NonPositiveMass { id: String, value: f64 },

    /// Distance from the sun is negative or not finite.
    #[error("body {id} has invalid distance from sun {value}")]
    InvalidDistance { id: String, value: f64 },

    /// Display color is not a `#RRGGBB` string.
    #[error("body {id} has invalid color {value:?}")]
    InvalidColor { id: String, value: String },
}

/// Simulation configuration is unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Speed bounds are non-finite, non-positive, or inverted.
    #[error("invalid speed bounds [{min}, {max}]")]
    InvalidSpeedBounds { min: f32, max: f32 },

    /// A scalar parameter is out of its valid domain.
    #[error("invalid value {value} for {name}")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Errors returned when constructing a [`Simulation`](crate::Simulation).
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
