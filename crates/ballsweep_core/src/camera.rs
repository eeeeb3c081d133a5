//! Perspective camera
//!
//! The camera is described by an eye position and a target point. Orbit
//! controls move the eye around the target; the projection depends only on
//! the field of view, aspect ratio, and clip planes.

use ballsweep_math::{mat4, Mat4, Vec3};

/// Perspective camera looking from `position` at `target`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveCamera {
    /// Eye position in world space
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// World up direction
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Viewport width / height
    pub aspect: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(45.0, 1.0, 1.0, 6000.0)
    }
}

impl PerspectiveCamera {
    /// Create a camera at the origin looking down -Z
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            fov,
            aspect,
            near,
            far,
        }
    }

    /// Builder: set the eye position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Point the camera at `target`
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Update the aspect ratio from a viewport size
    ///
    /// Zero-sized viewports (minimized windows) keep the previous aspect.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Unit vector from the eye towards the target
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalized()
    }

    /// World-to-view matrix
    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_at(self.position, self.target, self.up)
    }

    /// View-to-clip matrix
    pub fn projection_matrix(&self) -> Mat4 {
        mat4::perspective(self.fov.to_radians(), self.aspect, self.near, self.far)
    }
}
