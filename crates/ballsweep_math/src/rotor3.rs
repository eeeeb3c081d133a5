//! 3D Rotor for representing rotations in 3D space
//!
//! Rotations happen in planes. In 3D each plane has a single perpendicular
//! axis, so there are 3 rotation planes: XY, XZ, YZ.
//!
//! A 3D rotor has 4 components (1 scalar + 3 bivectors), which is the same
//! algebra as a unit quaternion. It is stored in quaternion form here
//! (`w` scalar, `x`/`y`/`z` for the YZ/ZX/XY bivectors).

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};
use crate::{Mat4, Vec3};

/// The 3 rotation planes in 3D space
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationPlane {
    /// XY plane - rotation around the Z axis
    XY,
    /// XZ plane - rotation around the Y axis (turntable spin)
    XZ,
    /// YZ plane - rotation around the X axis
    YZ,
}

impl RotationPlane {
    /// The axis perpendicular to this plane
    pub fn axis(self) -> Vec3 {
        match self {
            RotationPlane::XY => Vec3::Z,
            RotationPlane::XZ => Vec3::Y,
            RotationPlane::YZ => Vec3::X,
        }
    }
}

/// 3D Rotor for representing rotations
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rotor3 {
    /// Scalar component
    pub w: f32,
    /// YZ bivector component (rotation about X)
    pub x: f32,
    /// ZX bivector component (rotation about Y)
    pub y: f32,
    /// XY bivector component (rotation about Z)
    pub z: f32,
}

impl Default for Rotor3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Rotor3 {
    /// Identity rotor (no rotation)
    pub const IDENTITY: Self = Self { w: 1.0, x: 0.0, y: 0.0, z: 0.0 };

    /// Create a rotor that rotates by `angle` radians around `axis`
    ///
    /// Positive angles are counter-clockwise when looking down the axis
    /// towards the origin (right-handed).
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalized();
        let half = angle * 0.5;
        let s = half.sin();
        Self {
            w: half.cos(),
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
        }
    }

    /// Create a rotor for rotation in a single plane
    pub fn from_plane_angle(plane: RotationPlane, angle: f32) -> Self {
        Self::from_axis_angle(plane.axis(), angle)
    }

    /// Compute the squared magnitude of the rotor
    #[inline]
    pub fn magnitude_squared(&self) -> f32 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Normalize the rotor to unit magnitude
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude_squared().sqrt();
        if mag > 0.0 {
            let inv = 1.0 / mag;
            Self {
                w: self.w * inv,
                x: self.x * inv,
                y: self.y * inv,
                z: self.z * inv,
            }
        } else {
            Self::IDENTITY
        }
    }

    /// Compute the reverse (inverse for unit rotors)
    #[inline]
    pub fn reverse(&self) -> Self {
        Self { w: self.w, x: -self.x, y: -self.y, z: -self.z }
    }

    /// Compose two rotors: result = self * other
    ///
    /// The composed rotor applies `other` first, then `self`. Composing on
    /// the right is therefore a rotation in the object's local frame.
    pub fn compose(&self, other: &Self) -> Self {
        let (a, b) = (self, other);
        Self {
            w: a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
            x: a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            y: a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            z: a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
        }
    }

    /// Rotate a vector
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }

    /// Convert to a column-major 4x4 rotation matrix
    pub fn to_matrix(&self) -> Mat4 {
        let Self { w, x, y, z } = *self;
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);

        [
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy + wz), 2.0 * (xz - wy), 0.0],
            [2.0 * (xy - wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz + wx), 0.0],
            [2.0 * (xz + wy), 2.0 * (yz - wx), 1.0 - 2.0 * (xx + yy), 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_identity_rotation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Rotor3::IDENTITY.rotate(v), v);
    }

    #[test]
    fn test_plane_rotations() {
        let xy = Rotor3::from_plane_angle(RotationPlane::XY, FRAC_PI_2);
        assert!(approx(xy.rotate(Vec3::X), Vec3::Y));

        let xz = Rotor3::from_plane_angle(RotationPlane::XZ, FRAC_PI_2);
        assert!(approx(xz.rotate(Vec3::Z), Vec3::X));

        let yz = Rotor3::from_plane_angle(RotationPlane::YZ, FRAC_PI_2);
        assert!(approx(yz.rotate(Vec3::Y), Vec3::Z));
    }

    #[test]
    fn test_compose_applies_right_first() {
        let rx = Rotor3::from_plane_angle(RotationPlane::YZ, FRAC_PI_2);
        let rz = Rotor3::from_plane_angle(RotationPlane::XY, FRAC_PI_2);
        let combined = rx.compose(&rz);
        // rz: X -> Y, then rx: Y -> Z
        assert!(approx(combined.rotate(Vec3::X), Vec3::Z));
    }

    #[test]
    fn test_reverse_undoes_rotation() {
        let r = Rotor3::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.7);
        let v = Vec3::new(0.3, -2.0, 5.0);
        assert!(approx(r.reverse().rotate(r.rotate(v)), v));
    }

    #[test]
    fn test_matrix_matches_rotate() {
        let r = Rotor3::from_axis_angle(Vec3::new(0.2, 1.0, -0.4), 1.1);
        let v = Vec3::new(1.0, 2.0, 3.0);
        let m = r.to_matrix();
        assert!(approx(crate::mat4::transform_point(&m, v), r.rotate(v)));
    }

    #[test]
    fn test_normalize() {
        let r = Rotor3 { w: 2.0, x: 0.0, y: 0.0, z: 0.0 }.normalize();
        assert_eq!(r, Rotor3::IDENTITY);
        let zero = Rotor3 { w: 0.0, x: 0.0, y: 0.0, z: 0.0 };
        assert_eq!(zero.normalize(), Rotor3::IDENTITY);
    }
}
