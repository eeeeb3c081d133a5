//! Scene construction utilities
//!
//! This module provides a declarative API for building the scene graph and
//! the demo layout built with it.

mod scene_builder;

pub use scene_builder::{
    ball_positions, demo_scene, SceneBuilder, SceneError, BALL_GROUP_NAME, BALL_OFFSETS,
    BALL_RADIUS, BALL_START_X, MODEL_GROUP_NAME,
};
