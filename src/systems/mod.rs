//! Application systems
//!
//! Window, rendering and the frame loop, kept out of main.rs so they can be
//! tested without an event loop.

mod frame_driver;
mod render;
mod stats;
mod window;

pub use frame_driver::{FrameDriver, FrameRenderer, FrameStatus};
pub use render::{RenderError, RenderSystem};
pub use stats::{FpsSample, FrameStats};
pub use window::{WindowError, WindowSystem};
