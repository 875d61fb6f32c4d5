use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::core::scale::{ScaleMode, ScaleParams};
use crate::error::ConfigError;

/// Camera rig parameters handed to the renderer side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial eye position, looking at the origin.
    pub eye: [f32; 3],
    pub min_distance: f32,
    pub max_distance: f32,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Fraction of the remaining target offset kept after one 60 Hz frame.
    /// 0 snaps instantly, values near 1 ease slowly.
    pub smoothing: f32,
    /// Radians of orbit per pixel of drag.
    pub orbit_sensitivity: f32,
    /// Distance change per wheel unit, relative to the current distance.
    pub zoom_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [0.0, 10.0, 20.0],
            min_distance: 1.0,
            max_distance: 50.0,
            fov_y_degrees: 60.0,
            smoothing: 0.9,
            orbit_sensitivity: 0.005,
            zoom_sensitivity: 0.001,
        }
    }
}

/// Simulation configuration. Every field has a default, so a partial JSON
/// document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub speed_min: f32,
    pub speed_max: f32,
    pub initial_speed: f32,
    /// Speed buttons offered by the control panel.
    pub speed_presets: Vec<f32>,
    /// Ceiling for a single frame delta, in seconds.
    pub max_frame_dt: f32,
    /// Radians·days per second: a body with period P days advances
    /// `base_angular_velocity / P` radians per second at speed 1.
    pub base_angular_velocity: f64,
    /// Seconds the camera target stays at the star after a selection before
    /// it starts tracking the body. 0 retargets on the next tick.
    pub retarget_delay: f32,
    pub initial_selection: Option<String>,
    pub initial_scale_mode: ScaleMode,
    pub show_orbits: bool,
    pub start_paused: bool,
    /// Seed for the random initial phases.
    pub phase_seed: u64,
    pub scale: ScaleParams,
    pub camera: CameraConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            speed_min: 0.1,
            speed_max: 10.0,
            initial_speed: 1.0,
            speed_presets: vec![0.5, 1.0, 2.0, 5.0, 10.0],
            max_frame_dt: 0.1,
            base_angular_velocity: TAU * 20.0,
            retarget_delay: 0.1,
            initial_selection: Some("earth".to_string()),
            initial_scale_mode: ScaleMode::Compressed,
            show_orbits: true,
            start_paused: false,
            phase_seed: 0x5EED_0F_0B17,
            scale: ScaleParams::default(),
            camera: CameraConfig::default(),
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

impl SimConfig {
    /// Parse a config document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.speed_min, self.speed_max);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ConfigError::InvalidSpeedBounds { min, max });
        }
        if !self.initial_speed.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "initial_speed",
                value: self.initial_speed as f64,
            });
        }
        positive("max_frame_dt", self.max_frame_dt as f64)?;
        positive("base_angular_velocity", self.base_angular_velocity)?;
        if !(self.retarget_delay.is_finite() && self.retarget_delay >= 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "retarget_delay",
                value: self.retarget_delay as f64,
            });
        }
        if let Some((name, value)) = self.scale.invalid_field() {
            return Err(ConfigError::InvalidParameter { name, value });
        }

        let cam = &self.camera;
        positive("camera.min_distance", cam.min_distance as f64)?;
        if !(cam.max_distance.is_finite() && cam.max_distance >= cam.min_distance) {
            return Err(ConfigError::InvalidParameter {
                name: "camera.max_distance",
                value: cam.max_distance as f64,
            });
        }
        if !(cam.fov_y_degrees > 0.0 && cam.fov_y_degrees < 180.0) {
            return Err(ConfigError::InvalidParameter {
                name: "camera.fov_y_degrees",
                value: cam.fov_y_degrees as f64,
            });
        }
        if !(cam.smoothing >= 0.0 && cam.smoothing < 1.0) {
            return Err(ConfigError::InvalidParameter {
                name: "camera.smoothing",
                value: cam.smoothing as f64,
            });
        }
        if cam.eye.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::InvalidParameter { name: "camera.eye", value: f64::NAN });
        }
        Ok(())
    }
}
