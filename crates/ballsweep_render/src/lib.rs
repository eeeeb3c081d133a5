//! Scene Rendering Library
//!
//! This crate provides the wgpu-based forward renderer for the ballsweep
//! scene graph.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`pipeline::ScenePipeline`] - Opaque, translucent, and line passes
//! - [`pipeline::SceneUniforms`] - Camera and lighting uniforms
//! - [`renderable::RenderableGeometry`] - Converts the scene graph to GPU vertices
//! - [`renderable::LayeredGeometry`] - Static and animated layers rebuilt independently

pub mod context;
pub mod pipeline;
pub mod renderable;

// Re-export renderable for easy access
pub use renderable::{GeometryLayer, LayerChanges, LayeredGeometry, RenderableGeometry, SceneLighting};
