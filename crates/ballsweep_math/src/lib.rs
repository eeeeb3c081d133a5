//! 3D Mathematics Library
//!
//! This crate provides vector, rotation, matrix and mesh shape types for the
//! ballsweep demo.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Rotor3`] - 3D rotation (unit quaternion)
//! - [`Mat4`] - 4x4 column-major matrix for GPU transforms
//!
//! ## Shape Types
//!
//! - [`Shape3D`] - Trait for triangle meshes
//! - [`Triangle`] - A triangle defined by vertex indices
//! - [`Sphere3D`] - UV sphere
//! - [`Cylinder3D`] - Capped cylinder

mod vec3;
mod rotor3;
pub mod mat4;
pub mod shape;
pub mod sphere;
pub mod cylinder;

pub use vec3::Vec3;
pub use rotor3::{Rotor3, RotationPlane};
pub use mat4::Mat4;
pub use shape::{Shape3D, Triangle};
pub use sphere::Sphere3D;
pub use cylinder::Cylinder3D;
