use std::collections::HashMap;

use crate::bodies::body::{CelestialBody, Classification, Color};
use crate::bodies::catalog::BodyCatalog;
use crate::error::RegistryError;

/// Validated, read-only table of bodies, ordered by display position.
/// Provides id and name lookup for the simulation and the UI.
#[derive(Debug, Clone)]
pub struct BodyRegistry {
    bodies: Vec<CelestialBody>,
    index: HashMap<String, usize>,
    star: usize,
}

impl BodyRegistry {
    /// Validate body definitions and build the registry.
    /// Any invariant violation refuses the whole set.
    pub fn from_bodies(mut bodies: Vec<CelestialBody>) -> Result<Self, RegistryError> {
        if bodies.is_empty() {
            return Err(RegistryError::Empty);
        }
        // Stable: ties keep catalog order
        bodies.sort_by_key(|b| b.position);

        let mut index = HashMap::with_capacity(bodies.len());
        let mut star: Option<usize> = None;

        for (i, body) in bodies.iter().enumerate() {
            validate_body(body)?;
            if index.insert(body.id.clone(), i).is_some() {
                return Err(RegistryError::DuplicateId(body.id.clone()));
            }
            if body.is_star() {
                if let Some(first) = star {
                    return Err(RegistryError::MultipleStars {
                        first: bodies[first].id.clone(),
                        second: body.id.clone(),
                    });
                }
                star = Some(i);
            }
        }

        let star = star.ok_or(RegistryError::MissingStar)?;
        Ok(Self { bodies, index, star })
    }

    pub fn from_catalog(catalog: BodyCatalog) -> Result<Self, RegistryError> {
        Self::from_bodies(catalog.bodies)
    }

    /// Parse and validate a catalog JSON string.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        Self::from_catalog(BodyCatalog::from_json(json)?)
    }

    /// The built-in Sun-to-Pluto registry.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_catalog(BodyCatalog::builtin()?)
    }

    /// All bodies in display order.
    pub fn list(&self) -> &[CelestialBody] {
        &self.bodies
    }

    /// Look up a body by id. Returns None if not found.
    pub fn get(&self, id: &str) -> Option<&CelestialBody> {
        self.index.get(id).map(|&i| &self.bodies[i])
    }

    /// Case-insensitive lookup by display name.
    pub fn get_by_name(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.name.eq_ignore_ascii_case(name))
    }

    /// Display index of a body id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Body at a display index.
    pub fn at(&self, index: usize) -> Option<&CelestialBody> {
        self.bodies.get(index)
    }

    /// Body carrying the given display position number.
    pub fn by_position(&self, position: u32) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.position == position)
    }

    pub fn star(&self) -> &CelestialBody {
        &self.bodies[self.star]
    }

    pub fn star_index(&self) -> usize {
        self.star
    }

    /// Planets and dwarf planets, in display order.
    pub fn planets(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter().filter(|b| {
            matches!(b.classification, Classification::Planet | Classification::DwarfPlanet)
        })
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

fn validate_body(body: &CelestialBody) -> Result<(), RegistryError> {
    let id = || body.id.clone();

    if !(body.diameter.is_finite() && body.diameter > 0.0) {
        return Err(RegistryError::NonPositiveDiameter { id: id(), value: body.diameter });
    }
    if !(body.mass.is_finite() && body.mass > 0.0) {
        return Err(RegistryError::NonPositiveMass { id: id(), value: body.mass });
    }
    if !(body.distance_from_sun.is_finite() && body.distance_from_sun >= 0.0) {
        return Err(RegistryError::InvalidDistance { id: id(), value: body.distance_from_sun });
    }
    if body.classification.orbits() {
        // Negative periods are retrograde orbits; zero can't be divided by
        match body.orbital_period {
            Some(p) if p.is_finite() && p != 0.0 => {}
            _ => return Err(RegistryError::MissingOrbitalPeriod(id())),
        }
    }
    if Color::from_hex(&body.color).is_none() {
        return Err(RegistryError::InvalidColor { id: id(), value: body.color.clone() });
    }
    Ok(())
}
