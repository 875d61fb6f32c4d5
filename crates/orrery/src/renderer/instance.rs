use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::bodies::Color;

/// Per-body render data shared with the host renderer.
/// 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Sphere radius in render units.
    pub radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub alpha: f32,
    /// Axial rotation in radians.
    pub spin: f32,
    /// 1.0 for self-lit bodies (the star and its glow), 0.0 for lit ones.
    pub emissive: f32,
    /// 1.0 if this is the selected body.
    pub selected: f32,
    /// Index into the body list, for texture lookup on the host side.
    pub body_index: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// One orbit ring vertex: 7 floats (x, y, z, r, g, b, a).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct OrbitVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl OrbitVertex {
    pub const FLOATS: usize = 7;

    pub fn new(pos: Vec3, color: Color, a: f32) -> Self {
        Self { x: pos.x, y: pos.y, z: pos.z, r: color.r, g: color.g, b: color.b, a }
    }
}

/// Frame output: body instances plus orbit ring line strips.
///
/// Instances `[0..glow_start)` are opaque bodies; instances from
/// `glow_start` on are translucent additive shells.
/// Every ring is `ring_stride` vertices forming a closed line strip.
pub struct SceneBuffer {
    pub instances: Vec<BodyInstance>,
    pub glow_start: u32,
    pub orbit_vertices: Vec<OrbitVertex>,
    pub ring_stride: u32,
}

impl SceneBuffer {
    pub fn new() -> Self {
        Self::with_capacity(16, 16 * 65)
    }

    pub fn with_capacity(instances: usize, orbit_vertices: usize) -> Self {
        Self {
            instances: Vec::with_capacity(instances),
            glow_start: 0,
            orbit_vertices: Vec::with_capacity(orbit_vertices),
            ring_stride: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.orbit_vertices.clear();
        self.glow_start = 0;
        self.ring_stride = 0;
    }

    pub fn push(&mut self, instance: BodyInstance) {
        self.instances.push(instance);
    }

    /// Mark everything pushed so far as opaque; later pushes are glow.
    pub fn begin_glow(&mut self) {
        self.glow_start = self.instances.len() as u32;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn ring_count(&self) -> u32 {
        if self.ring_stride == 0 {
            0
        } else {
            self.orbit_vertices.len() as u32 / self.ring_stride
        }
    }

    pub fn orbit_vertex_count(&self) -> u32 {
        self.orbit_vertices.len() as u32
    }

    /// Raw pointer to instance data for host-side reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn orbit_vertices_ptr(&self) -> *const f32 {
        self.orbit_vertices.as_ptr() as *const f32
    }
}

impl Default for SceneBuffer {
    fn default() -> Self {
        Self::new()
    }
}
