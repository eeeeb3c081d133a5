//! Per-frame update loop
//!
//! Each tick runs, in order: stats, render, spin, sweep. The renderer
//! therefore always draws the positions produced by the previous tick.

use std::time::Duration;

use ballsweep_core::SimulationState;
use super::render::RenderError;
use super::stats::{FpsSample, FrameStats};

/// Something that can draw the simulation state
///
/// `render` may clear dirty flags after uploading changed geometry, hence
/// the mutable state.
pub trait FrameRenderer {
    /// Draw one frame
    fn render(&mut self, state: &mut SimulationState) -> Result<(), RenderError>;

    /// Recover after the surface was lost
    fn recover(&mut self);
}

/// Result of one tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// Another frame should be scheduled
    Continue,
    /// The loop has stopped; no further frames run
    Stopped,
}

/// Drives the animation one frame at a time
pub struct FrameDriver {
    running: bool,
    paused: bool,
    spin_rate: f32,
    stats: FrameStats,
    /// Set when a new FPS sample lands or the pause state flips
    status_changed: bool,
}

impl FrameDriver {
    /// Create a running driver with the given per-frame spin
    pub fn new(spin_rate: f32) -> Self {
        Self {
            running: true,
            paused: false,
            spin_rate,
            stats: FrameStats::new(),
            status_changed: true,
        }
    }

    /// Use a different FPS sampling interval
    pub fn with_stats_interval(mut self, interval: Duration) -> Self {
        self.stats = FrameStats::with_interval(interval);
        self
    }

    /// Run one frame
    pub fn tick<R: FrameRenderer>(
        &mut self,
        state: &mut SimulationState,
        renderer: &mut R,
    ) -> FrameStatus {
        if !self.running {
            return FrameStatus::Stopped;
        }

        if self.stats.update().is_some() {
            self.status_changed = true;
        }

        match renderer.render(state) {
            Ok(()) => {}
            Err(RenderError::SurfaceLost) => renderer.recover(),
            Err(RenderError::OutOfMemory) => {
                log::error!("GPU out of memory, stopping");
                self.stop();
                return FrameStatus::Stopped;
            }
            Err(e) => log::warn!("{}", e),
        }

        if !self.paused {
            state.spin(self.spin_rate);
            state.sweep();
        }

        FrameStatus::Continue
    }

    /// Stop the loop; later ticks do nothing
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Frame loop stopped after {} frames", self.stats.total_frames());
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Toggle the animation pause; rendering continues while paused
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.status_changed = true;
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Most recent FPS sample
    pub fn fps(&self) -> Option<FpsSample> {
        self.stats.latest()
    }

    /// Whether the FPS or pause state changed since the last call
    ///
    /// Reading clears the flag. The first call on a new driver returns true.
    pub fn take_status_changed(&mut self) -> bool {
        std::mem::take(&mut self.status_changed)
    }

    /// Frames ticked so far
    pub fn frame_count(&self) -> u64 {
        self.stats.total_frames()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballsweep_core::{PALETTE_A, PALETTE_B, NodeKey, Vec3};
    use crate::config::AppConfig;
    use crate::scene::demo_scene;

    /// Records what the renderer saw and fails on request
    #[derive(Default)]
    struct RecordingRenderer {
        seen_x: Vec<Vec<f32>>,
        fail_with: Option<RenderError>,
        recovered: usize,
    }

    impl FrameRenderer for RecordingRenderer {
        fn render(&mut self, state: &mut SimulationState) -> Result<(), RenderError> {
            let xs = state
                .balls
                .balls()
                .iter()
                .map(|&key| state.scene.get(key).map_or(f32::NAN, |n| n.transform.position.x))
                .collect();
            self.seen_x.push(xs);
            state.scene.clear_all_dirty();
            match self.fail_with.take() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }

        fn recover(&mut self) {
            self.recovered += 1;
        }
    }

    fn demo() -> SimulationState {
        demo_scene(&AppConfig::default()).unwrap()
    }

    fn ball_x(state: &SimulationState, key: NodeKey) -> f32 {
        state.scene.get(key).unwrap().transform.position.x
    }

    #[test]
    fn test_render_sees_positions_before_sweep() {
        let mut state = demo();
        let mut renderer = RecordingRenderer::default();
        let mut driver = FrameDriver::new(0.001);

        assert_eq!(driver.tick(&mut state, &mut renderer), FrameStatus::Continue);
        assert_eq!(driver.tick(&mut state, &mut renderer), FrameStatus::Continue);

        assert!(renderer.seen_x[0].iter().all(|&x| x == -4.8));
        assert!(renderer.seen_x[1].iter().all(|&x| (x - (-4.7)).abs() < 1e-5));
        let first = state.balls.balls()[0];
        assert!((ball_x(&state, first) - (-4.6)).abs() < 1e-5);
        assert_eq!(driver.frame_count(), 2);
    }

    #[test]
    fn test_spinner_rotates_each_frame() {
        let mut state = demo();
        let spinner = state.spinner.unwrap();
        let before = state.scene.get(spinner).unwrap().transform.rotation;

        let mut driver = FrameDriver::new(0.5);
        driver.tick(&mut state, &mut RecordingRenderer::default());

        let after = state.scene.get(spinner).unwrap().transform.rotation;
        assert_ne!(before, after);
        let rotated_x = after.rotate(Vec3::X);
        assert!((rotated_x.y).abs() < 1e-5, "spin must stay about the Y axis");
    }

    #[test]
    fn test_surface_lost_recovers_and_continues() {
        let mut state = demo();
        let mut renderer = RecordingRenderer {
            fail_with: Some(RenderError::SurfaceLost),
            ..Default::default()
        };
        let mut driver = FrameDriver::new(0.001);

        assert_eq!(driver.tick(&mut state, &mut renderer), FrameStatus::Continue);
        assert_eq!(renderer.recovered, 1);
        // The simulation still advanced
        let first = state.balls.balls()[0];
        assert!((ball_x(&state, first) - (-4.7)).abs() < 1e-5);
    }

    #[test]
    fn test_other_error_skips_frame_only() {
        let mut state = demo();
        let mut renderer = RecordingRenderer {
            fail_with: Some(RenderError::Other("timeout".to_string())),
            ..Default::default()
        };
        let mut driver = FrameDriver::new(0.001);

        assert_eq!(driver.tick(&mut state, &mut renderer), FrameStatus::Continue);
        assert_eq!(renderer.recovered, 0);
        assert!(driver.is_running());
    }

    #[test]
    fn test_out_of_memory_stops() {
        let mut state = demo();
        let mut renderer = RecordingRenderer {
            fail_with: Some(RenderError::OutOfMemory),
            ..Default::default()
        };
        let mut driver = FrameDriver::new(0.001);

        assert_eq!(driver.tick(&mut state, &mut renderer), FrameStatus::Stopped);
        assert!(!driver.is_running());
        // No sweep after the failed frame
        let first = state.balls.balls()[0];
        assert_eq!(ball_x(&state, first), -4.8);
    }

    #[test]
    fn test_stop_halts_all_ticks() {
        let mut state = demo();
        let mut renderer = RecordingRenderer::default();
        let mut driver = FrameDriver::new(0.001);

        driver.tick(&mut state, &mut renderer);
        driver.stop();
        assert_eq!(driver.tick(&mut state, &mut renderer), FrameStatus::Stopped);
        assert_eq!(renderer.seen_x.len(), 1);
        let first = state.balls.balls()[0];
        assert!((ball_x(&state, first) - (-4.7)).abs() < 1e-5);
    }

    #[test]
    fn test_pause_renders_without_animating() {
        let mut state = demo();
        let mut renderer = RecordingRenderer::default();
        let mut driver = FrameDriver::new(0.001);

        assert!(driver.toggle_pause());
        for _ in 0..3 {
            assert_eq!(driver.tick(&mut state, &mut renderer), FrameStatus::Continue);
        }
        assert_eq!(renderer.seen_x.len(), 3);
        let first = state.balls.balls()[0];
        assert_eq!(ball_x(&state, first), -4.8);

        assert!(!driver.toggle_pause());
        driver.tick(&mut state, &mut renderer);
        assert!((ball_x(&state, first) - (-4.7)).abs() < 1e-5);
    }

    #[test]
    fn test_balls_recolor_after_crossing_midpoint() {
        let mut state = demo();
        let mut renderer = RecordingRenderer::default();
        let mut driver = FrameDriver::new(0.001);

        driver.tick(&mut state, &mut renderer);
        for &key in state.balls.balls() {
            let node = state.scene.get(key).unwrap();
            assert_eq!(node.as_mesh().map(|m| m.material.color), Some(PALETTE_A));
        }

        // -4.8 + 0.1 * 49 = 0.1 > 0
        for _ in 0..48 {
            driver.tick(&mut state, &mut renderer);
        }
        let recolored = state
            .balls
            .balls()
            .iter()
            .filter(|&&key| {
                let node = state.scene.get(key).unwrap();
                node.as_mesh().map(|m| m.material.color) == Some(PALETTE_B)
            })
            .count();
        // Balls "0", "2", "4", "6" and "8"
        assert_eq!(recolored, 5);
    }

    #[test]
    fn test_status_changes_on_pause_toggle() {
        let mut state = demo();
        let mut renderer = RecordingRenderer::default();
        let mut driver = FrameDriver::new(0.001).with_stats_interval(Duration::from_secs(3600));

        // Initial state is reported once
        assert!(driver.take_status_changed());
        assert!(!driver.take_status_changed());

        // Frames without a new sample leave the status alone
        for _ in 0..5 {
            driver.tick(&mut state, &mut renderer);
        }
        assert!(!driver.take_status_changed());

        driver.toggle_pause();
        assert!(driver.take_status_changed());
        assert!(!driver.take_status_changed());
    }

    #[test]
    fn test_status_changes_on_new_fps_sample() {
        let mut state = demo();
        let mut renderer = RecordingRenderer::default();
        let mut driver = FrameDriver::new(0.001).with_stats_interval(Duration::ZERO);
        driver.take_status_changed();

        driver.tick(&mut state, &mut renderer);
        assert!(driver.fps().is_some());
        assert!(driver.take_status_changed());
        assert!(!driver.take_status_changed());
    }
}
