//! Ball sweep demo
//!
//! A WebGPU scene of nine spheres sweeping along X inside a translucent
//! cylinder, recoloring as they cross the midpoint.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
