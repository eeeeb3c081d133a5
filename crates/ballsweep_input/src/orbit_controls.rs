//! Orbit controls
//!
//! Controls:
//! - Left drag: orbit around the target
//! - Right drag: pan the target and camera together
//! - Mouse wheel: dolly towards or away from the target
//!
//! Mouse events only accumulate input; [`OrbitControls::update`] applies it
//! to a camera once per frame.

use std::f32::consts::PI;
use ballsweep_core::PerspectiveCamera;
use ballsweep_math::Vec3;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Smallest polar angle away from the poles
const POLAR_EPSILON: f32 = 1e-6;

/// Base dolly factor for one wheel step
const ZOOM_BASE: f32 = 0.95;

/// Mouse-driven orbit controller (Y is up)
pub struct OrbitControls {
    /// Point the camera orbits around
    target: Vec3,

    // Mouse state
    rotating: bool,
    panning: bool,
    pending_rotate: (f32, f32),
    pending_pan: (f32, f32),
    pending_zoom: f32,
    viewport_height: f32,

    // Configuration
    pub enabled: bool,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitControls {
    /// Controls orbiting the origin
    pub fn new() -> Self {
        Self {
            target: Vec3::ZERO,

            rotating: false,
            panning: false,
            pending_rotate: (0.0, 0.0),
            pending_pan: (0.0, 0.0),
            pending_zoom: 0.0,
            viewport_height: 1.0,

            enabled: true,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
        }
    }

    /// The orbit target
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Point the camera at the target
    ///
    /// This overrides wherever the camera was looking before.
    pub fn attach<C: CameraControl>(&self, camera: &mut C) {
        camera.set_target(self.target);
    }

    /// Track the viewport height used to scale drags
    pub fn set_viewport_height(&mut self, height: u32) {
        if height > 0 {
            self.viewport_height = height as f32;
        }
    }

    /// Process mouse button input
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;

        match button {
            MouseButton::Left => self.rotating = pressed,
            MouseButton::Right => self.panning = pressed,
            _ => {}
        }
    }

    /// Process raw mouse movement in pixels
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        if !self.enabled {
            return;
        }
        if self.rotating {
            self.pending_rotate.0 += delta_x as f32;
            self.pending_rotate.1 += delta_y as f32;
        } else if self.panning {
            self.pending_pan.0 += delta_x as f32;
            self.pending_pan.1 += delta_y as f32;
        }
    }

    /// Process a mouse wheel event
    ///
    /// Positive steps (wheel forward) dolly in. Pixel deltas from touchpads
    /// count as one step per event.
    pub fn process_scroll(&mut self, delta: MouseScrollDelta) {
        if !self.enabled {
            return;
        }
        self.pending_zoom += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => (pos.y as f32).signum(),
        };
    }

    /// Check if a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.rotating || self.panning
    }

    /// Apply accumulated input to the camera
    ///
    /// Returns true if the camera moved.
    pub fn update<C: CameraControl>(&mut self, camera: &mut C) -> bool {
        let rotate = std::mem::take(&mut self.pending_rotate);
        let pan = std::mem::take(&mut self.pending_pan);
        let zoom = std::mem::take(&mut self.pending_zoom);
        if !self.enabled || (rotate == (0.0, 0.0) && pan == (0.0, 0.0) && zoom == 0.0) {
            return false;
        }

        let offset = camera.position() - self.target;
        let mut radius = offset.length();
        if radius <= f32::EPSILON {
            return false;
        }
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        // A drag across the full viewport height is one full turn
        let per_pixel = 2.0 * PI / self.viewport_height * self.rotate_speed;
        theta -= rotate.0 * per_pixel;
        phi = (phi - rotate.1 * per_pixel).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        if zoom != 0.0 {
            radius *= ZOOM_BASE.powf(self.zoom_speed * zoom);
        }
        radius = radius.max(self.min_distance).min(self.max_distance);

        if pan != (0.0, 0.0) {
            self.target += self.pan_offset(camera, pan, radius);
        }

        let sin_phi = phi.sin();
        let offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.set_position(self.target + offset);
        camera.set_target(self.target);
        true
    }

    /// World-space pan so that a drag moves the scene with the cursor at the
    /// target's depth
    fn pan_offset<C: CameraControl>(&self, camera: &C, pan: (f32, f32), radius: f32) -> Vec3 {
        let forward = (self.target - camera.position()).normalized();
        let right = forward.cross(Vec3::Y).normalized();
        let up = right.cross(forward);
        let half_fov = camera.fov().to_radians() / 2.0;
        let world_per_pixel = 2.0 * radius * half_fov.tan() / self.viewport_height * self.pan_speed;
        right * (-pan.0 * world_per_pixel) + up * (pan.1 * world_per_pixel)
    }

    /// Builder: set rotate speed
    pub fn with_rotate_speed(mut self, speed: f32) -> Self {
        self.rotate_speed = speed;
        self
    }

    /// Builder: set zoom speed
    pub fn with_zoom_speed(mut self, speed: f32) -> Self {
        self.zoom_speed = speed;
        self
    }

    /// Builder: set pan speed
    pub fn with_pan_speed(mut self, speed: f32) -> Self {
        self.pan_speed = speed;
        self
    }

    /// Builder: set the dolly distance range
    pub fn with_distance_range(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max.max(min);
        self
    }

    /// Builder: set the orbit target
    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Builder: enable or disable the controls
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Trait for camera control
/// Allows the controls to drive different camera implementations
pub trait CameraControl {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn set_target(&mut self, target: Vec3);
    /// Vertical field of view in degrees
    fn fov(&self) -> f32;
}

impl CameraControl for PerspectiveCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn set_target(&mut self, target: Vec3) {
        self.look_at(target);
    }

    fn fov(&self) -> f32 {
        self.fov
    }
}
