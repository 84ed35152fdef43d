//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Convert an 8-bit RGB triple plus alpha to a float color
pub fn rgba(rgb: [u8; 3], alpha: u8) -> [f32; 4] {
    [
        rgb[0] as f32 / 255.0,
        rgb[1] as f32 / 255.0,
        rgb[2] as f32 / 255.0,
        alpha as f32 / 255.0,
    ]
}

/// Colors for game elements
pub mod colors {
    pub const APPLE: [u8; 3] = [255, 210, 0];
    pub const TRAIL: [u8; 3] = [0, 220, 80];
    pub const HEAD: [u8; 3] = [120, 255, 120];
    pub const PROJECTILE: [u8; 3] = [255, 255, 255];
}
