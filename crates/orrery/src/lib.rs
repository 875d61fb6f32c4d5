pub mod api;
pub mod bodies;
pub mod core;
pub mod error;
pub mod input;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::config::{CameraConfig, SimConfig};
pub use api::sim::{BodyRender, RenderState, Simulation};
pub use api::types::SimEvent;
pub use bodies::{BodyCatalog, BodyDetails, BodyRegistry, CelestialBody, Classification, Color};
pub use crate::core::focus::{FocusState, SelectionFocus};
pub use crate::core::orbit::{InitialPhases, OrbitEngine, OrbitState};
pub use crate::core::scale::{ScaleMode, ScaleParams, ScalePolicy};
pub use crate::core::time::SimulationClock;
pub use error::{ConfigError, RegistryError, SimulationError};
pub use input::queue::{Command, InputEvent, InputQueue};
pub use renderer::camera::{CameraUniform, OrbitCamera, Projection};
pub use renderer::instance::{BodyInstance, OrbitVertex, SceneBuffer};
pub use renderer::scene::{compose, hit_test};
