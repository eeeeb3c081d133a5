//! Capped cylinder geometry
//!
//! The cylinder is centered on the origin with its axis along Y. The side
//! wall and the two caps use separate vertices so that each gets its own
//! normals.

use std::f32::consts::PI;
use crate::{Vec3, shape::{Shape3D, Triangle}};

/// Default radial segment count
pub const DEFAULT_RADIAL_SEGMENTS: usize = 32;

/// A cylinder (or truncated cone) centered on the origin
#[derive(Clone, Debug)]
pub struct Cylinder3D {
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    triangles: Vec<Triangle>,
}

impl Cylinder3D {
    /// Create a cylinder with the default tessellation (one height segment)
    pub fn new(radius_top: f32, radius_bottom: f32, height: f32) -> Self {
        Self::with_segments(radius_top, radius_bottom, height, DEFAULT_RADIAL_SEGMENTS, 1)
    }

    /// Create a cylinder with explicit tessellation
    pub fn with_segments(
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: usize,
        height_segments: usize,
    ) -> Self {
        let radial_segments = radial_segments.max(3);
        let height_segments = height_segments.max(1);
        let half_height = height / 2.0;
        let slope = if height != 0.0 { (radius_bottom - radius_top) / height } else { 0.0 };

        let mut cylinder = Self {
            radius_top,
            radius_bottom,
            height,
            vertices: Vec::new(),
            normals: Vec::new(),
            triangles: Vec::new(),
        };

        // Side wall
        let row = radial_segments + 1;
        for y in 0..=height_segments {
            let v = y as f32 / height_segments as f32;
            let radius = v * (radius_bottom - radius_top) + radius_top;
            for x in 0..=radial_segments {
                let theta = x as f32 / radial_segments as f32 * 2.0 * PI;
                let (sin, cos) = theta.sin_cos();
                cylinder.vertices.push(Vec3::new(radius * sin, -v * height + half_height, radius * cos));
                cylinder.normals.push(Vec3::new(sin, slope, cos).normalized());
            }
        }
        for y in 0..height_segments {
            for x in 0..radial_segments {
                let a = y * row + x;
                let b = (y + 1) * row + x;
                let c = (y + 1) * row + x + 1;
                let d = y * row + x + 1;
                cylinder.triangles.push(Triangle::new([a, b, d]));
                cylinder.triangles.push(Triangle::new([b, c, d]));
            }
        }

        cylinder.push_cap(radius_top, half_height, radial_segments, true);
        cylinder.push_cap(radius_bottom, -half_height, radial_segments, false);

        cylinder
    }

    fn push_cap(&mut self, radius: f32, y: f32, radial_segments: usize, top: bool) {
        let normal = if top { Vec3::Y } else { -Vec3::Y };
        let center = self.vertices.len();
        self.vertices.push(Vec3::new(0.0, y, 0.0));
        self.normals.push(normal);

        for x in 0..=radial_segments {
            let theta = x as f32 / radial_segments as f32 * 2.0 * PI;
            let (sin, cos) = theta.sin_cos();
            self.vertices.push(Vec3::new(radius * sin, y, radius * cos));
            self.normals.push(normal);
        }

        for x in 0..radial_segments {
            let i = center + 1 + x;
            // Wind each cap so it faces outward
            if top {
                self.triangles.push(Triangle::new([i, i + 1, center]));
            } else {
                self.triangles.push(Triangle::new([i + 1, i, center]));
            }
        }
    }

    /// Top cap radius
    pub fn radius_top(&self) -> f32 {
        self.radius_top
    }

    /// Bottom cap radius
    pub fn radius_bottom(&self) -> f32 {
        self.radius_bottom
    }

    /// Total height along Y
    pub fn height(&self) -> f32 {
        self.height
    }
}

impl Shape3D for Cylinder3D {
    fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let cyl = Cylinder3D::new(2.0, 2.0, 20.0);
        // Wall: 33 * 2, caps: 2 * (1 + 33)
        assert_eq!(cyl.vertex_count(), 66 + 68);
        // Wall: 32 quads, caps: 32 triangles each
        assert_eq!(cyl.triangle_count(), 64 + 64);
    }

    #[test]
    fn test_extent() {
        let cyl = Cylinder3D::new(2.0, 2.0, 20.0);
        let max_y = cyl.vertices().iter().map(|v| v.y).fold(f32::MIN, f32::max);
        let min_y = cyl.vertices().iter().map(|v| v.y).fold(f32::MAX, f32::min);
        assert_eq!(max_y, 10.0);
        assert_eq!(min_y, -10.0);

        for v in cyl.vertices() {
            assert!((v.x * v.x + v.z * v.z).sqrt() <= 2.0 + 1e-5);
        }
    }

    #[test]
    fn test_wall_normals_are_horizontal() {
        let cyl = Cylinder3D::new(2.0, 2.0, 20.0);
        for n in &cyl.normals()[..66] {
            assert!(n.y.abs() < 1e-6);
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_indices_in_range() {
        let cyl = Cylinder3D::with_segments(1.0, 0.5, 3.0, 6, 3);
        let count = cyl.vertex_count();
        for tri in cyl.triangles() {
            assert!(tri.indices.iter().all(|&i| i < count));
        }
        assert_eq!(cyl.height(), 3.0);
        assert_eq!(cyl.radius_top(), 1.0);
        assert_eq!(cyl.radius_bottom(), 0.5);
    }
}
