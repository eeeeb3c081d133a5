//! 3D Transform (position, rotation, scale)
//!
//! A Transform3D places a scene node relative to its parent.

use ballsweep_math::{mat4, Mat4, RotationPlane, Rotor3, Vec3};
use serde::{Serialize, Deserialize};

/// A 3D transform with position, rotation, and uniform scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    /// Position relative to the parent node
    pub position: Vec3,
    /// Rotation relative to the parent node
    pub rotation: Rotor3,
    /// Uniform scale factor
    pub scale: f32,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform3D {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Rotor3::IDENTITY,
            scale: 1.0,
        }
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Rotor3) -> Self {
        Self {
            position,
            rotation,
            scale: 1.0,
        }
    }

    /// Model matrix (scale, then rotation, then translation)
    #[inline]
    pub fn to_matrix(&self) -> Mat4 {
        mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Transform a point from local space to parent space
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.rotation.rotate(p * self.scale) + self.position
    }

    /// Transform a direction (ignores translation and scale)
    ///
    /// Used for normals; uniform scale never changes their direction.
    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        self.rotation.rotate(d)
    }

    /// Compose two transforms: result = self * other
    ///
    /// The composed transform applies `other` first, then `self`.
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            position: self.transform_point(other.position),
            rotation: self.rotation.compose(&other.rotation),
            scale: self.scale * other.scale,
        }
    }

    /// Translate the transform by an offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Rotate around one of the node's own axes
    ///
    /// Successive calls accumulate in the local frame, so rotating X then Z
    /// turns around the already-rotated Z axis.
    pub fn rotate_local(&mut self, plane: RotationPlane, angle: f32) {
        let rotor = Rotor3::from_plane_angle(plane, angle);
        self.rotation = self.rotation.compose(&rotor).normalize();
    }
}
