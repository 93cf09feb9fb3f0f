//! GPU-compatible data types for the tent section pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};

/// A vertex of a tent cross-section
///
/// Produced by the CPU slicer and consumed by the render pipeline.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex3D {
    /// Position in 3D space (x, y, z)
    pub position: [f32; 3],
    /// Outward face normal for lighting
    pub normal: [f32; 3],
    /// RGBA color of the element the face belongs to
    pub color: [f32; 4],
    /// Slice time the vertex was cut at
    pub time: f32,
    /// Padding to align to 16 bytes
    pub _padding: f32,
}

impl Default for Vertex3D {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            normal: [0.0, 0.0, 1.0],
            color: [1.0; 4],
            time: 0.0,
            _padding: 0.0,
        }
    }
}

impl Vertex3D {
    /// Create a new section vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 4], time: f32) -> Self {
        Self {
            position,
            normal,
            color,
            time,
            _padding: 0.0,
        }
    }
}

/// Render uniforms for the 3D rendering pass
/// Layout: 176 bytes total (must match render.wgsl RenderUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct RenderUniforms {
    /// View matrix (64 bytes)
    pub view_matrix: [[f32; 4]; 4],
    /// Projection matrix (64 bytes)
    pub projection_matrix: [[f32; 4]; 4],
    /// Light direction (normalized) + padding (16 bytes)
    pub light_dir: [f32; 3],
    pub _padding: f32,
    /// Lighting parameters (16 bytes)
    pub ambient_strength: f32,
    pub diffuse_strength: f32,
    /// How strongly the slice position within the tent tints the color
    pub time_color_strength: f32,
    /// Lowest and highest time of the tent
    pub time_min: f32,
    pub time_max: f32,
    pub _padding2: [f32; 3],
}

impl Default for RenderUniforms {
    fn default() -> Self {
        Self {
            view_matrix: IDENTITY,
            projection_matrix: IDENTITY,
            light_dir: [0.5, 1.0, 0.3],
            _padding: 0.0,
            ambient_strength: 0.3,
            diffuse_strength: 0.7,
            time_color_strength: 0.4,
            time_min: 0.0,
            time_max: 1.0,
            _padding2: [0.0; 3],
        }
    }
}

const IDENTITY: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Size of a single triangle in Vertex3D units (3 vertices)
pub const TRIANGLE_VERTEX_COUNT: usize = 3;

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_vertex3d_size() {
        // 3 floats position + 3 floats normal + 4 floats color + 1 float time + 1 float padding
        // = 12 floats = 48 bytes
        assert_eq!(size_of::<Vertex3D>(), 48);
    }

    #[test]
    fn test_render_uniforms_size() {
        // 16 floats view + 16 floats projection + 4 floats light
        // + 4 floats (ambient, diffuse, time_color, time_min) + 4 floats (time_max, padding)
        // = 44 floats = 176 bytes, a multiple of 16
        assert_eq!(size_of::<RenderUniforms>(), 176);
        assert_eq!(size_of::<RenderUniforms>() % 16, 0);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(std::mem::align_of::<Vertex3D>(), 4);
        assert_eq!(std::mem::align_of::<RenderUniforms>(), 4);
    }
}
