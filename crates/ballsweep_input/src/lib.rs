//! Camera input handling
//!
//! This crate provides mouse-driven orbit controls for the demo camera.

mod orbit_controls;

pub use orbit_controls::{CameraControl, OrbitControls};
