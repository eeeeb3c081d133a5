//! Renderable geometry - bridges the scene graph to GPU buffers
//!
//! This module flattens every mesh and helper in a [`SceneGraph`] into
//! world-space vertex lists, split by the pass that draws them.
//! [`LayeredGeometry`] further splits the scene into a static layer and an
//! animated layer so a moving subtree does not force the rest of the scene
//! to be rebuilt.

use std::collections::HashSet;

use ballsweep_core::{Light, NodeKey, NodeKind, SceneGraph, SceneNode, Shading, Shape3D, Transform3D, Vec3};
use crate::pipeline::{SceneUniforms, Vertex3D};

/// GPU-ready geometry collected from a scene
///
/// Triangles are stored unindexed, three vertices per triangle. Lines are
/// stored two vertices per segment.
#[derive(Debug, Default)]
pub struct RenderableGeometry {
    /// Triangles drawn with depth writes
    pub opaque: Vec<Vertex3D>,
    /// Translucent triangles, blended after everything else
    pub transparent: Vec<Vertex3D>,
    /// Helper line segments
    pub lines: Vec<Vertex3D>,
}

impl RenderableGeometry {
    /// Create an empty renderable geometry
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect geometry from every node in a scene
    pub fn from_scene(scene: &SceneGraph) -> Self {
        let mut result = Self::new();
        scene.traverse(|_, node, world| result.add_node(node, world));
        result
    }

    /// Add one node's geometry, already placed by its world transform
    ///
    /// Groups, lights and cameras contribute nothing.
    pub fn add_node(&mut self, node: &SceneNode, world: &Transform3D) {
        match &node.kind {
            NodeKind::Mesh(mesh) => {
                let shape = mesh.shape.as_shape();
                let color = mesh.material.rgba();
                let lit = mesh.material.shading == Shading::Lambert;
                let target = if mesh.material.transparent {
                    &mut self.transparent
                } else {
                    &mut self.opaque
                };

                let vertices = shape.vertices();
                let normals = shape.normals();
                target.reserve(shape.triangle_count() * 3);
                for tri in shape.triangles() {
                    for &i in &tri.indices {
                        let position = world.transform_point(vertices[i]);
                        let normal = normals.get(i).map_or(Vec3::ZERO, |&n| world.transform_direction(n));
                        target.push(Vertex3D::new(position.to_array(), normal.to_array(), color, lit));
                    }
                }
            }
            NodeKind::Helper(helper) => {
                for v in helper.line_vertices() {
                    let position = world.transform_point(v.position);
                    self.lines.push(Vertex3D::line(position.to_array(), v.color));
                }
            }
            NodeKind::Group | NodeKind::Light(_) | NodeKind::Camera(_) => {}
        }
    }

    /// Clear all geometry
    pub fn clear(&mut self) {
        self.opaque.clear();
        self.transparent.clear();
        self.lines.clear();
    }

    /// Total number of triangles
    pub fn triangle_count(&self) -> usize {
        (self.opaque.len() + self.transparent.len()) / 3
    }

    /// Number of line segments
    pub fn line_count(&self) -> usize {
        self.lines.len() / 2
    }
}

/// Which set of vertex buffers a node is drawn from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryLayer {
    /// Nodes outside every animated subtree
    Static,
    /// Nodes inside an animated subtree
    Animated,
}

impl GeometryLayer {
    pub const ALL: [GeometryLayer; 2] = [GeometryLayer::Static, GeometryLayer::Animated];
}

/// Which layers the last [`LayeredGeometry::sync`] rebuilt
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayerChanges {
    pub static_rebuilt: bool,
    pub animated_rebuilt: bool,
}

impl LayerChanges {
    /// Whether a given layer was rebuilt
    pub fn rebuilt(&self, layer: GeometryLayer) -> bool {
        match layer {
            GeometryLayer::Static => self.static_rebuilt,
            GeometryLayer::Animated => self.animated_rebuilt,
        }
    }

    pub fn any(&self) -> bool {
        self.static_rebuilt || self.animated_rebuilt
    }
}

/// Scene geometry kept as a static layer and an animated layer
///
/// Each layer is rebuilt only when one of its own nodes is dirty. A dirty
/// static node that is an ancestor of an animated subtree rebuilds the
/// animated layer too, since it moves everything below it.
#[derive(Debug, Default)]
pub struct LayeredGeometry {
    static_layer: RenderableGeometry,
    animated_layer: RenderableGeometry,
    built: bool,
}

impl LayeredGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One layer's geometry
    pub fn layer(&self, layer: GeometryLayer) -> &RenderableGeometry {
        match layer {
            GeometryLayer::Static => &self.static_layer,
            GeometryLayer::Animated => &self.animated_layer,
        }
    }

    /// Rebuild whichever layers hold dirty nodes
    ///
    /// Subtrees rooted at `animated_roots` form the animated layer. The first
    /// call builds both layers. Dirty flags are left for the caller to clear
    /// once the result has been uploaded.
    pub fn sync(&mut self, scene: &SceneGraph, animated_roots: &[NodeKey]) -> LayerChanges {
        let animated: HashSet<NodeKey> = animated_roots
            .iter()
            .flat_map(|&root| scene.descendants(root))
            .collect();

        let mut changes = LayerChanges {
            static_rebuilt: !self.built,
            animated_rebuilt: !self.built,
        };
        for (key, node) in scene.iter() {
            if !node.is_dirty() {
                continue;
            }
            if animated.contains(&key) {
                changes.animated_rebuilt = true;
            } else {
                changes.static_rebuilt = true;
            }
        }
        if changes.static_rebuilt && !changes.animated_rebuilt {
            changes.animated_rebuilt = animated_roots.iter().any(|&root| has_dirty_ancestor(scene, root));
        }
        if !changes.any() {
            return changes;
        }

        if changes.static_rebuilt {
            self.static_layer.clear();
        }
        if changes.animated_rebuilt {
            self.animated_layer.clear();
        }
        let static_layer = &mut self.static_layer;
        let animated_layer = &mut self.animated_layer;
        scene.traverse(|key, node, world| {
            if animated.contains(&key) {
                if changes.animated_rebuilt {
                    animated_layer.add_node(node, world);
                }
            } else if changes.static_rebuilt {
                static_layer.add_node(node, world);
            }
        });
        self.built = true;
        changes
    }

    /// Triangles across both layers
    pub fn triangle_count(&self) -> usize {
        self.static_layer.triangle_count() + self.animated_layer.triangle_count()
    }

    /// Line segments across both layers
    pub fn line_count(&self) -> usize {
        self.static_layer.line_count() + self.animated_layer.line_count()
    }
}

fn has_dirty_ancestor(scene: &SceneGraph, key: NodeKey) -> bool {
    let mut parent = scene.get(key).and_then(|n| n.parent());
    while let Some(node) = parent.and_then(|p| scene.get(p)) {
        if node.is_dirty() {
            return true;
        }
        parent = node.parent();
    }
    false
}

/// Lighting gathered from the light nodes of a scene
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneLighting {
    /// Ambient color, already scaled by intensity and summed over lights
    pub ambient: [f32; 3],
    /// Direction towards the first directional light (normalized)
    pub light_dir: [f32; 3],
    /// Directional light color
    pub light_color: [f32; 3],
    /// Directional light intensity (zero if there is none)
    pub light_intensity: f32,
}

impl Default for SceneLighting {
    fn default() -> Self {
        Self {
            ambient: [0.0; 3],
            light_dir: [0.0, 1.0, 0.0],
            light_color: [1.0; 3],
            light_intensity: 0.0,
        }
    }
}

impl SceneLighting {
    /// Sum ambient lights and pick the first directional light
    pub fn from_scene(scene: &SceneGraph) -> Self {
        let mut lighting = Self::default();
        let mut has_directional = false;
        scene.traverse(|_, node, world| {
            let NodeKind::Light(light) = &node.kind else { return };
            match *light {
                Light::Ambient { color, intensity } => {
                    let rgb = color.to_rgb();
                    for (acc, c) in lighting.ambient.iter_mut().zip(rgb) {
                        *acc += c * intensity;
                    }
                }
                Light::Directional { color, intensity, direction } if !has_directional => {
                    let dir = world.transform_direction(direction);
                    if dir.length_squared() > 0.0 {
                        lighting.light_dir = dir.normalized().to_array();
                    }
                    lighting.light_color = color.to_rgb();
                    lighting.light_intensity = intensity;
                    has_directional = true;
                }
                Light::Directional { .. } => {}
            }
        });
        lighting
    }

    /// Copy the lighting terms into shader uniforms
    pub fn apply(&self, uniforms: &mut SceneUniforms) {
        uniforms.ambient_color = self.ambient;
        uniforms.ambient_intensity = 1.0;
        uniforms.light_dir = self.light_dir;
        uniforms.light_color = self.light_color;
        uniforms.light_intensity = self.light_intensity;
    }
}
