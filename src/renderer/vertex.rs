//! Vertex types handed to a renderer

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// One point of the terrain polyline
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SplineVertex {
    pub position: [f32; 2],
}

impl SplineVertex {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { position: [x, y] }
    }
}

impl From<Vec2> for SplineVertex {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Raw bytes for a vertex buffer upload
pub fn as_bytes(vertices: &[SplineVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.9, 0.9, 0.9, 1.0];
    pub const GAME_OVER: [f32; 4] = [0.55, 0.1, 0.1, 1.0];
}
