//! Rendering pipeline components
//!
//! GPU vertex and uniform types plus the forward scene pipeline.

pub mod types;
pub mod scene_pipeline;

// Re-export types
pub use types::{SceneUniforms, Vertex3D};

// Re-export pipelines
pub use scene_pipeline::{ScenePipeline, DEPTH_FORMAT};
