//! Shape traits and primitives for 3D geometry
//!
//! Shapes are pure geometric data - no colors, materials, or rendering info.

use crate::Vec3;

/// A triangle defined by vertex indices
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle {
    /// Indices into the parent shape's vertex array
    pub indices: [usize; 3],
}

impl Triangle {
    /// Create a new triangle with the given vertex indices
    #[inline]
    pub fn new(indices: [usize; 3]) -> Self {
        Self { indices }
    }
}

/// Trait for triangle-mesh shapes
///
/// `vertices()` and `normals()` have the same length; `normals()[i]` is the
/// unit surface normal at `vertices()[i]` in the shape's local space.
pub trait Shape3D: Send + Sync {
    /// Get the vertices of this shape
    fn vertices(&self) -> &[Vec3];

    /// Get the per-vertex normals of this shape
    fn normals(&self) -> &[Vec3];

    /// Get the triangles of this shape
    fn triangles(&self) -> &[Triangle];

    /// Get the number of vertices
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    /// Get the number of triangles
    #[inline]
    fn triangle_count(&self) -> usize {
        self.triangles().len()
    }
}
