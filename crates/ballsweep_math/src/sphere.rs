//! UV sphere geometry
//!
//! Vertices are laid out as a `(width_segments + 1) x (height_segments + 1)`
//! grid of latitude rows, starting at the north pole (+Y). The seam column is
//! duplicated so every row has its own wrap-around vertex.

use std::f32::consts::PI;
use crate::{Vec3, shape::{Shape3D, Triangle}};

/// Default longitudinal segment count
pub const DEFAULT_WIDTH_SEGMENTS: usize = 32;
/// Default latitudinal segment count
pub const DEFAULT_HEIGHT_SEGMENTS: usize = 16;

/// A sphere centered on the origin
#[derive(Clone, Debug)]
pub struct Sphere3D {
    radius: f32,
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    triangles: Vec<Triangle>,
}

impl Sphere3D {
    /// Create a sphere with the default segment counts
    pub fn new(radius: f32) -> Self {
        Self::with_segments(radius, DEFAULT_WIDTH_SEGMENTS, DEFAULT_HEIGHT_SEGMENTS)
    }

    /// Create a sphere with explicit tessellation
    ///
    /// Segment counts are clamped to the minimum that still encloses volume
    /// (3 around, 2 from pole to pole).
    pub fn with_segments(radius: f32, width_segments: usize, height_segments: usize) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);

        let mut vertices = Vec::with_capacity((width_segments + 1) * (height_segments + 1));
        let mut normals = Vec::with_capacity(vertices.capacity());
        let mut triangles = Vec::new();

        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let dir = Vec3::new(
                    -(u * 2.0 * PI).cos() * (v * PI).sin(),
                    (v * PI).cos(),
                    (u * 2.0 * PI).sin() * (v * PI).sin(),
                );
                vertices.push(dir * radius);
                normals.push(dir.normalized());
            }
        }

        let row = width_segments + 1;
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;

                // The pole rows collapse to a point, so skip their degenerate halves
                if iy != 0 {
                    triangles.push(Triangle::new([a, b, d]));
                }
                if iy != height_segments - 1 {
                    triangles.push(Triangle::new([b, c, d]));
                }
            }
        }

        Self { radius, vertices, normals, triangles }
    }

    /// The sphere radius
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Shape3D for Sphere3D {
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
    fn test_default_sphere_counts() {
        let sphere = Sphere3D::new(0.3);
        assert_eq!(sphere.vertex_count(), 33 * 17);
        // 32 quads per row, pole rows contribute one triangle each
        assert_eq!(sphere.triangle_count(), 32 * (2 * 16 - 2));
    }

    #[test]
    fn test_vertices_on_surface() {
        let sphere = Sphere3D::with_segments(0.3, 8, 6);
        for v in sphere.vertices() {
            assert!((v.length() - 0.3).abs() < 1e-5);
        }
        for n in sphere.normals() {
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_indices_in_range() {
        let sphere = Sphere3D::with_segments(1.0, 5, 4);
        let count = sphere.vertex_count();
        for tri in sphere.triangles() {
            assert!(tri.indices.iter().all(|&i| i < count));
        }
    }

    #[test]
    fn test_segments_clamped() {
        let sphere = Sphere3D::with_segments(1.0, 0, 0);
        assert_eq!(sphere.vertex_count(), 4 * 3);
        assert_eq!(sphere.radius(), 1.0);
    }
}
