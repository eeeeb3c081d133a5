//! Input handling module
//!
//! Maps keyboard shortcuts to semantic actions.

mod input_mapper;

pub use input_mapper::{InputMapper, InputAction};
