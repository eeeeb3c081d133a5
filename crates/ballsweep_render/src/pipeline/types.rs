//! GPU-compatible data types for the scene pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use ballsweep_math::{mat4, Mat4};

/// A world-space vertex ready for drawing
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex3D {
    /// Position in world space (x, y, z)
    pub position: [f32; 3],
    /// Surface normal for lighting (zero for lines)
    pub normal: [f32; 3],
    /// RGBA color
    pub color: [f32; 4],
    /// 1.0 if the vertex takes Lambert lighting, 0.0 for flat color
    pub lit: f32,
    /// Padding to align to 16 bytes
    pub _padding: f32,
}

impl Vertex3D {
    /// A lit or unlit triangle vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 4], lit: bool) -> Self {
        Self {
            position,
            normal,
            color,
            lit: if lit { 1.0 } else { 0.0 },
            _padding: 0.0,
        }
    }

    /// An unlit line vertex
    pub fn line(position: [f32; 3], color: [f32; 3]) -> Self {
        Self::new(position, [0.0; 3], [color[0], color[1], color[2], 1.0], false)
    }
}

impl Default for Vertex3D {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            normal: [0.0, 0.0, 1.0],
            color: [1.0; 4],
            lit: 0.0,
            _padding: 0.0,
        }
    }
}

/// Uniforms shared by every pass
/// Layout: 176 bytes total (must match scene.wgsl SceneUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SceneUniforms {
    /// View matrix (64 bytes)
    pub view_matrix: [[f32; 4]; 4],
    /// Projection matrix (64 bytes)
    pub projection_matrix: [[f32; 4]; 4],
    /// Direction towards the directional light (normalized) + intensity (16 bytes)
    pub light_dir: [f32; 3],
    pub light_intensity: f32,
    /// Directional light color + ambient intensity (16 bytes)
    pub light_color: [f32; 3],
    pub ambient_intensity: f32,
    /// Ambient light color + padding (16 bytes)
    pub ambient_color: [f32; 3],
    pub _padding: f32,
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view_matrix: mat4::IDENTITY,
            projection_matrix: mat4::IDENTITY,
            light_dir: [0.5, 1.0, 0.3],
            light_intensity: 0.0,
            light_color: [1.0; 3],
            ambient_intensity: 1.0,
            ambient_color: [1.0; 3],
            _padding: 0.0,
        }
    }
}

impl SceneUniforms {
    /// Builder: set the camera matrices
    pub fn with_camera(mut self, view: Mat4, projection: Mat4) -> Self {
        self.view_matrix = view;
        self.projection_matrix = projection;
        self
    }
}
