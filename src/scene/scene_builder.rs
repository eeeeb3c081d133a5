//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for building the scene graph, plus the fixed demo
//! layout.

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;
use ballsweep_core::{
    BallGroup, BallSweep, Color, Cylinder3D, Helper, Light, Material, NodeKey, PerspectiveCamera,
    RotationPlane, SceneGraph, SceneNode, ShapeRef, SimulationState, Sphere3D, SweepBoundsError,
    Transform3D, Vec3, BALL_COUNT, PALETTE_B,
};
use crate::config::AppConfig;

/// (y, z) offsets of the demo balls before the shared (0.5, -0.5) shift
pub const BALL_OFFSETS: [(f32, f32); BALL_COUNT] = [
    (0.0, 0.0),
    (1.0, 1.0),
    (1.0, -1.0),
    (-1.0, 1.0),
    (-1.0, 0.0),
    (1.0, 2.0),
    (0.0, 2.0),
    (1.0, 1.5),
    (0.5, -1.3),
];

/// X coordinate every demo ball starts at
pub const BALL_START_X: f32 = -4.8;

/// Radius of each demo ball
pub const BALL_RADIUS: f32 = 0.3;

/// Name of the group holding the balls
pub const BALL_GROUP_NAME: &str = "ball group";

/// Name of the outer model group
pub const MODEL_GROUP_NAME: &str = "model";

/// Errors assembling a runnable scene
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// No ball group was added
    MissingBallGroup,
    /// No camera was added
    MissingCamera,
    /// The configured sweep bounds are invalid
    InvalidBounds(SweepBoundsError),
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::MissingBallGroup => write!(f, "Scene has no ball group"),
            SceneError::MissingCamera => write!(f, "Scene has no camera"),
            SceneError::InvalidBounds(e) => write!(f, "Invalid sweep bounds: {}", e),
        }
    }
}

impl std::error::Error for SceneError {}

impl From<SweepBoundsError> for SceneError {
    fn from(e: SweepBoundsError) -> Self {
        SceneError::InvalidBounds(e)
    }
}

/// Builder for constructing the scene graph
///
/// # Example
/// ```ignore
/// let state = SceneBuilder::new()
///     .add_group("model")
///     .add_ball_group(Some("model"), "balls", 0.3, Material::lambert(PALETTE_B), &positions)
///     .add_ambient_light(Color::WHITE, 1.0)
///     .add_camera(PerspectiveCamera::default())
///     .into_state(BallSweep::default())?;
/// ```
pub struct SceneBuilder {
    scene: SceneGraph,
    balls: Option<BallGroup>,
    camera: Option<NodeKey>,
}

impl SceneBuilder {
    /// Create a new scene builder
    pub fn new() -> Self {
        Self {
            scene: SceneGraph::new(),
            balls: None,
            camera: None,
        }
    }

    /// Add an empty named group at the top level
    pub fn add_group(mut self, name: &str) -> Self {
        self.scene.add(SceneNode::group().with_name(name));
        self
    }

    /// Add a cylinder mesh at the top level
    pub fn add_cylinder(mut self, name: &str, cylinder: Cylinder3D, material: Material, transform: Transform3D) -> Self {
        self.scene.add(
            SceneNode::mesh(ShapeRef::owned(cylinder), material)
                .with_name(name)
                .with_transform(transform),
        );
        self
    }

    /// Add a group of balls sharing one sphere mesh
    ///
    /// The group goes under the node called `parent`, or at the top level
    /// when `parent` is `None` or not found. Only the last ball group added
    /// is animated.
    pub fn add_ball_group(
        mut self,
        parent: Option<&str>,
        name: &str,
        radius: f32,
        material: Material,
        positions: &[Vec3],
    ) -> Self {
        let parent_key = parent.and_then(|p| {
            let key = self.scene.find_by_name(p);
            if key.is_none() {
                log::warn!("Parent '{}' not found; adding '{}' at the top level", p, name);
            }
            key
        });

        self.balls = BallGroup::spawn(
            &mut self.scene,
            parent_key,
            name,
            Arc::new(Sphere3D::new(radius)),
            material,
            positions,
        );
        self
    }

    /// Add an ambient light
    pub fn add_ambient_light(mut self, color: Color, intensity: f32) -> Self {
        self.scene
            .add(SceneNode::light(Light::Ambient { color, intensity }).with_name("ambient light"));
        self
    }

    /// Add a directional light shining from `direction`
    pub fn add_directional_light(mut self, color: Color, intensity: f32, direction: Vec3) -> Self {
        self.scene.add(
            SceneNode::light(Light::Directional { color, intensity, direction })
                .with_name("directional light"),
        );
        self
    }

    /// Add an axes helper at the origin
    pub fn add_axes(mut self, size: f32) -> Self {
        self.scene.add(SceneNode::helper(Helper::Axes { size }).with_name("axes"));
        self
    }

    /// Add a grid helper in the XZ plane
    pub fn add_grid(mut self, size: f32, divisions: u32, center_color: Color, grid_color: Color) -> Self {
        self.scene.add(
            SceneNode::helper(Helper::Grid {
                size,
                divisions,
                center_color,
                grid_color,
            })
            .with_name("grid"),
        );
        self
    }

    /// Add the render camera
    pub fn add_camera(mut self, camera: PerspectiveCamera) -> Self {
        self.camera = Some(self.scene.add(SceneNode::camera(camera).with_name("camera")));
        self
    }

    /// Add a custom node at the top level
    ///
    /// For nodes that don't fit the standard patterns.
    pub fn add_node(mut self, node: SceneNode) -> Self {
        self.scene.add(node);
        self
    }

    /// Build the scene and return the scene graph
    pub fn build(self) -> SceneGraph {
        self.scene
    }

    /// Build the scene into a runnable simulation state
    pub fn into_state(self, sweep: BallSweep) -> Result<SimulationState, SceneError> {
        let balls = self.balls.ok_or(SceneError::MissingBallGroup)?;
        let camera = self.camera.ok_or(SceneError::MissingCamera)?;
        Ok(SimulationState::new(self.scene, balls, camera, sweep))
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Starting positions of the demo balls, relative to their group
pub fn ball_positions() -> Vec<Vec3> {
    BALL_OFFSETS
        .iter()
        .map(|&(y, z)| Vec3::new(BALL_START_X, y + 0.5, z - 0.5))
        .collect()
}

/// Assemble the demo scene from configuration
///
/// A translucent cylinder lying along X, nine balls in a group inside a
/// "model" group, an ambient light, axes and grid helpers, and the camera.
pub fn demo_scene(config: &AppConfig) -> Result<SimulationState, SceneError> {
    let sweep = BallSweep::new(config.sweep.bounds()?);

    let mut cylinder_transform = Transform3D::from_position(Vec3::new(0.0, 1.0, 0.0));
    cylinder_transform.rotate_local(RotationPlane::YZ, FRAC_PI_2);
    cylinder_transform.rotate_local(RotationPlane::XY, FRAC_PI_2);

    let mut camera = PerspectiveCamera::new(
        config.camera.fov,
        config.window.width.max(1) as f32 / config.window.height.max(1) as f32,
        config.camera.near,
        config.camera.far,
    )
    .with_position(config.camera.position());
    camera.look_at(config.camera.look_at());

    let mut builder = SceneBuilder::new()
        .add_cylinder(
            "cylinder",
            Cylinder3D::new(2.0, 2.0, 20.0),
            Material::unlit(Color::from_hex(0x00BFFF)).with_opacity(0.2),
            cylinder_transform,
        )
        .add_group(MODEL_GROUP_NAME)
        .add_ball_group(
            Some(MODEL_GROUP_NAME),
            BALL_GROUP_NAME,
            BALL_RADIUS,
            Material::lambert(PALETTE_B),
            &ball_positions(),
        )
        .add_ambient_light(Color::WHITE, 1.0);

    if config.rendering.light_intensity > 0.0 {
        builder = builder.add_directional_light(
            Color::WHITE,
            config.rendering.light_intensity,
            Vec3::from_array(config.rendering.light_dir),
        );
    }

    let state = builder
        .add_axes(80.0)
        .add_grid(30.0, 30, Color::from_hex(0x004444), Color::from_hex(0x004444))
        .add_camera(camera)
        .into_state(sweep)?;

    let (groups, meshes, lights, helpers, cameras) = state.scene.kind_counts();
    log::info!(
        "Built scene: {} groups, {} meshes, {} lights, {} helpers, {} cameras",
        groups, meshes, lights, helpers, cameras
    );
    Ok(state)
}
