use bytemuck::{Pod, Zeroable};

use crate::core::scale::ScaleMode;

/// A state-change notification sent from the simulation to the UI layer.
/// `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SimEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SimEvent {
    pub const FLOATS: usize = 4;

    /// `a` = speed multiplier, `b` = 1 if paused.
    pub const CLOCK: f32 = 1.0;
    /// `a` = display position of the selected body or -1, `b` = its orbit
    /// radius in render units.
    pub const SELECTION: f32 = 2.0;
    /// `a` = scale mode code, `b` = 1 if orbit rings are shown.
    pub const SCALE: f32 = 3.0;

    pub fn clock(speed: f32, paused: bool) -> Self {
        Self { kind: Self::CLOCK, a: speed, b: flag(paused), c: 0.0 }
    }

    pub fn selection(position: Option<u32>, orbit_radius: f32) -> Self {
        let a = position.map_or(-1.0, |p| p as f32);
        Self { kind: Self::SELECTION, a, b: orbit_radius, c: 0.0 }
    }

    pub fn scale(mode: ScaleMode, show_orbits: bool) -> Self {
        Self { kind: Self::SCALE, a: mode.code(), b: flag(show_orbits), c: 0.0 }
    }
}

fn flag(on: bool) -> f32 {
    if on { 1.0 } else { 0.0 }
}
