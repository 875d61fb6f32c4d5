use serde::{Deserialize, Serialize};

/// What kind of body a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    Star,
    Planet,
    #[serde(alias = "dwarf planet")]
    DwarfPlanet,
}

impl Classification {
    /// Stars sit at the origin; everything else orbits.
    pub fn orbits(self) -> bool {
        !matches!(self, Classification::Star)
    }
}

/// Display color in linear RGB, parsed from `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };
    pub const GREY: Self = Self { r: 0.4, g: 0.4, b: 0.4 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (leading `#` optional). Returns None on malformed input.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

/// Descriptive fields consumed by the detail view, never by the simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BodyDetails {
    /// Surface gravity (m/s²).
    pub gravity: Option<f64>,
    /// Mean temperature (°C).
    pub temperature: Option<f64>,
    pub atmosphere: Vec<String>,
    pub moons: Option<u32>,
    pub rings: Option<bool>,
    pub description: String,
    pub fun_facts: Vec<String>,
}

/// Immutable record for one body of the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialBody {
    /// Stable unique key, e.g. "earth".
    pub id: String,
    pub name: String,
    pub classification: Classification,
    /// Diameter in km.
    pub diameter: f64,
    /// Mass in kg.
    pub mass: f64,
    /// Mean orbital distance in millions of km. Zero for the star.
    #[serde(default)]
    pub distance_from_sun: f64,
    /// Orbital period in days. Absent for the star.
    #[serde(default)]
    pub orbital_period: Option<f64>,
    /// Rotation period in hours. Negative means retrograde.
    #[serde(default)]
    pub rotation_period: Option<f64>,
    /// `#RRGGBB` display color.
    pub color: String,
    /// Opaque texture reference resolved by the renderer.
    #[serde(default)]
    pub texture: Option<String>,
    /// Fixed display order (0 = star).
    #[serde(default)]
    pub position: u32,
    #[serde(flatten)]
    pub details: BodyDetails,
}

impl CelestialBody {
    pub fn is_star(&self) -> bool {
        !self.classification.orbits()
    }

    /// Parsed display color. Registry validation guarantees this is Some.
    pub fn rgb(&self) -> Option<Color> {
        Color::from_hex(&self.color)
    }

    /// +1.0 for prograde rotation, -1.0 for retrograde, 0.0 if unknown.
    pub fn spin_direction(&self) -> f64 {
        match self.rotation_period {
            Some(p) if p < 0.0 => -1.0,
            Some(p) if p > 0.0 => 1.0,
            _ => 0.0,
        }
    }
}
