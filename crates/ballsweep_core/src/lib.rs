//! Core types for the ballsweep demo
//!
//! This crate provides the scene graph and the per-frame ball animation:
//!
//! - [`Transform3D`] - Position, rotation, and scale in 3D space
//! - [`Color`] - 24-bit RGB display color
//! - [`Material`] - Visual properties of a mesh
//! - [`SceneNode`] / [`NodeKind`] - A node in the scene tree (group, mesh, light, helper, camera)
//! - [`SceneGraph`] - Container and hierarchy for all nodes
//! - [`NodeKey`] - Generational key to a node in the graph
//! - [`PerspectiveCamera`] - Viewing parameters
//! - [`BallGroup`] - The fixed group of moving spheres
//! - [`BallSweep`] / [`SweepBounds`] - The per-frame sweep and recolor rule
//! - [`SimulationState`] - Everything one frame mutates, passed explicitly

mod color;
mod transform;
mod node;
mod helper;
mod camera;
mod scene;
mod ball;
mod sweep;
mod state;

pub use color::Color;
pub use transform::Transform3D;
pub use node::{DirtyFlags, Light, Material, MeshNode, NodeKind, SceneNode, Shading, ShapeRef};
pub use helper::{Helper, LineVertex};
pub use camera::PerspectiveCamera;
pub use scene::{NodeKey, SceneGraph};
pub use ball::{BallGroup, BALL_COUNT};
pub use sweep::{BallSweep, SweepBounds, SweepBoundsError, PALETTE_A, PALETTE_B};
pub use state::SimulationState;

// Re-export commonly used types from ballsweep_math for convenience
pub use ballsweep_math::{Vec3, Rotor3, RotationPlane, Shape3D, Sphere3D, Cylinder3D};
