use serde::{Deserialize, Serialize};

use crate::bodies::body::CelestialBody;

/// The built-in Sun-to-Pluto catalog.
pub const BUILTIN_CATALOG_JSON: &str = include_str!("../../data/solar_system.json");

/// Body definitions as loaded from JSON, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyCatalog {
    pub bodies: Vec<CelestialBody>,
}

impl BodyCatalog {
    /// Parse a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn builtin() -> Result<Self, serde_json::Error> {
        Self::from_json(BUILTIN_CATALOG_JSON)
    }
}
