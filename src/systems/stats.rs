//! Frame statistics
//!
//! Counts frames and produces a frames-per-second sample once per interval.

use std::time::{Duration, Instant};

/// Default sampling interval
const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// One FPS measurement
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FpsSample {
    /// Frames per second over the interval
    pub fps: f32,
    /// Mean frame time in milliseconds over the interval
    pub frame_ms: f32,
}

/// Rolling frame counter
pub struct FrameStats {
    interval: Duration,
    window_start: Instant,
    frames_in_window: u32,
    total_frames: u64,
    latest: Option<FpsSample>,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStats {
    /// Create a counter sampling once per second
    pub fn new() -> Self {
        Self::with_interval(SAMPLE_INTERVAL)
    }

    /// Create a counter with a custom sampling interval
    pub fn with_interval(interval: Duration) -> Self {
        Self::starting_at(Instant::now(), interval)
    }

    fn starting_at(start: Instant, interval: Duration) -> Self {
        Self {
            interval,
            window_start: start,
            frames_in_window: 0,
            total_frames: 0,
            latest: None,
        }
    }

    /// Count a frame now
    ///
    /// Returns a fresh sample when the interval has elapsed.
    pub fn update(&mut self) -> Option<FpsSample> {
        self.update_at(Instant::now())
    }

    /// Count a frame at the given time
    pub fn update_at(&mut self, now: Instant) -> Option<FpsSample> {
        self.frames_in_window += 1;
        self.total_frames += 1;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.interval {
            return None;
        }

        let secs = elapsed.as_secs_f32();
        let sample = FpsSample {
            fps: self.frames_in_window as f32 / secs,
            frame_ms: secs * 1000.0 / self.frames_in_window as f32,
        };
        log::debug!("{:.1} FPS ({:.2} ms/frame)", sample.fps, sample.frame_ms);

        self.latest = Some(sample);
        self.window_start = now;
        self.frames_in_window = 0;
        Some(sample)
    }

    /// Most recent sample, if one interval has completed
    pub fn latest(&self) -> Option<FpsSample> {
        self.latest
    }

    /// Frames counted since creation
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }
}
