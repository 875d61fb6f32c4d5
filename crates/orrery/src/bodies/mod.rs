pub mod body;
pub mod catalog;
pub mod registry;

pub use body::{BodyDetails, CelestialBody, Classification, Color};
pub use catalog::{BodyCatalog, BUILTIN_CATALOG_JSON};
pub use registry::BodyRegistry;
