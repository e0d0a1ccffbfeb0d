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

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const DIRT: [f32; 4] = [0.45, 0.31, 0.18, 1.0];
    pub const DIRT_SPECK: [f32; 4] = [0.38, 0.26, 0.15, 1.0];
    pub const GRASS: [f32; 4] = [0.25, 0.7, 0.2, 1.0];
    pub const GRASS_BITTEN: [f32; 4] = [0.55, 0.65, 0.2, 1.0];
    pub const MAC_BROWN: [f32; 4] = [0.55, 0.35, 0.2, 1.0];
    pub const MAC_GINGER: [f32; 4] = [0.9, 0.55, 0.2, 1.0];
    pub const MAC_CREAM: [f32; 4] = [0.95, 0.9, 0.75, 1.0];
    pub const MAC_EYE: [f32; 4] = [0.05, 0.05, 0.05, 1.0];
    pub const MAC_MOUTH: [f32; 4] = [0.3, 0.8, 0.25, 1.0];
    pub const TITLE_VEIL: [f32; 4] = [0.05, 0.1, 0.05, 0.75];
    pub const TITLE_BANNER: [f32; 4] = [0.3, 0.75, 0.25, 1.0];
    pub const OVER_VEIL: [f32; 4] = [0.1, 0.0, 0.0, 0.7];
    pub const OVER_BANNER: [f32; 4] = [0.85, 0.2, 0.15, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.02, 1.0];
}
