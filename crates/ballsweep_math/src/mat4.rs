//! 4x4 Matrix utilities for 3D transformations
//!
//! Matrices are column-major (`m[column][row]`) so they can be written
//! straight into WGSL `mat4x4<f32>` uniforms.

use crate::{Rotor3, Vec3};

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Right-handed perspective projection with a `[0, 1]` depth range (wgpu clip space)
///
/// # Arguments
/// * `fov_y` - Vertical field of view in radians
/// * `aspect` - Viewport width / height
/// * `near`, `far` - Clip plane distances (both positive)
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far * nf, -1.0],
        [0.0, 0.0, near * far * nf, 0.0],
    ]
}

/// Right-handed look-at view matrix
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (target - eye).normalized();
    let s = f.cross(up).normalized();
    let u = s.cross(f);

    [
        [s.x, u.x, -f.x, 0.0],
        [s.y, u.y, -f.y, 0.0],
        [s.z, u.z, -f.z, 0.0],
        [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
    ]
}

/// Model matrix applying scale, then rotation, then translation
pub fn from_scale_rotation_translation(scale: f32, rotation: Rotor3, translation: Vec3) -> Mat4 {
    let mut m = rotation.to_matrix();
    for column in m.iter_mut().take(3) {
        for value in column.iter_mut().take(3) {
            *value *= scale;
        }
    }
    m[3] = [translation.x, translation.y, translation.z, 1.0];
    m
}

/// Transform a point (w = 1)
pub fn transform_point(m: &Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
    )
}

/// Transform a point and return homogeneous clip coordinates
pub fn transform_point4(m: &Mat4, p: Vec3) -> [f32; 4] {
    let mut out = [0.0f32; 4];
    for (row, value) in out.iter_mut().enumerate() {
        *value = m[0][row] * p.x + m[1][row] * p.y + m[2][row] * p.z + m[3][row];
    }
    out
}
