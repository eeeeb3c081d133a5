//! Scene nodes, materials, and lights
//!
//! A SceneNode is one entry in the scene tree. What it is (group, mesh,
//! light, helper or camera) is a closed set encoded in [`NodeKind`], so code
//! that only cares about meshes matches on the variant instead of probing
//! properties at runtime.

use std::collections::HashSet;
use std::sync::Arc;
use bitflags::bitflags;
use ballsweep_math::{Shape3D, Vec3};
use crate::{Color, Helper, PerspectiveCamera, Transform3D};
use crate::scene::NodeKey;

bitflags! {
    /// Flags indicating which parts of a node have changed and need updating
    ///
    /// The renderer only rebuilds vertex data when some node is dirty.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Transform (position, rotation, scale) has changed
        const TRANSFORM = 1 << 0;
        /// Mesh/shape has changed
        const MESH = 1 << 1;
        /// Material has changed
        const MATERIAL = 1 << 2;
        /// All flags set - node needs full rebuild
        const ALL = Self::TRANSFORM.bits() | Self::MESH.bits() | Self::MATERIAL.bits();
    }
}

/// How a material responds to lights
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Shading {
    /// Diffuse (Lambert) shading from the scene's lights
    #[default]
    Lambert,
    /// Flat color, lights ignored
    Unlit,
}

/// Visual properties of a mesh
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Base color
    pub color: Color,
    /// Opacity (only applied when `transparent` is set)
    pub opacity: f32,
    /// Render in the blended pass
    pub transparent: bool,
    /// Lighting model
    pub shading: Shading,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            opacity: 1.0,
            transparent: false,
            shading: Shading::Lambert,
        }
    }
}

impl Material {
    /// Opaque Lambert material
    pub fn lambert(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// Unlit material
    pub fn unlit(color: Color) -> Self {
        Self {
            color,
            shading: Shading::Unlit,
            ..Self::default()
        }
    }

    /// Make the material translucent with the given opacity
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self.transparent = true;
        self
    }

    /// RGBA color as fed to the GPU
    pub fn rgba(&self) -> [f32; 4] {
        let alpha = if self.transparent { self.opacity } else { 1.0 };
        self.color.to_rgba(alpha)
    }
}

/// Reference to a shape - either shared (Arc) or owned (Box)
///
/// Use `Shared` when several meshes use the same geometry (the balls do).
pub enum ShapeRef {
    /// A shared reference to a shape
    Shared(Arc<dyn Shape3D>),
    /// An owned shape (unique to this node)
    Owned(Box<dyn Shape3D>),
}

impl ShapeRef {
    /// Create a shared shape reference
    pub fn shared<S: Shape3D + 'static>(shape: S) -> Self {
        Self::Shared(Arc::new(shape))
    }

    /// Create an owned shape reference
    pub fn owned<S: Shape3D + 'static>(shape: S) -> Self {
        Self::Owned(Box::new(shape))
    }

    /// Get a reference to the underlying shape
    pub fn as_shape(&self) -> &dyn Shape3D {
        match self {
            ShapeRef::Shared(arc) => arc.as_ref(),
            ShapeRef::Owned(boxed) => boxed.as_ref(),
        }
    }
}

/// A renderable mesh
pub struct MeshNode {
    /// The mesh geometry
    pub shape: ShapeRef,
    /// The mesh material
    pub material: Material,
}

/// A light source
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    /// Uniform light from every direction
    Ambient { color: Color, intensity: f32 },
    /// Parallel light; `direction` points from the scene towards the light
    Directional { color: Color, intensity: f32, direction: Vec3 },
}

/// What a node is
pub enum NodeKind {
    /// A container for other nodes
    Group,
    /// Geometry with a material
    Mesh(MeshNode),
    /// A light source
    Light(Light),
    /// A debug helper drawn as lines
    Helper(Helper),
    /// A viewpoint
    Camera(PerspectiveCamera),
}

impl NodeKind {
    /// Short lowercase name of the variant, for logs
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Group => "group",
            NodeKind::Mesh(_) => "mesh",
            NodeKind::Light(_) => "light",
            NodeKind::Helper(_) => "helper",
            NodeKind::Camera(_) => "camera",
        }
    }
}

/// A node in the scene tree
///
/// Each node has:
/// - An optional name (for lookup by name; balls use it as their id)
/// - Tags (for categorization and filtering)
/// - A transform relative to its parent
/// - A kind
/// - Dirty flags (for change tracking)
pub struct SceneNode {
    /// Optional name for this node
    pub name: Option<String>,
    /// Tags for categorization (e.g., "ball", "decoration")
    pub tags: HashSet<String>,
    /// The node's transform relative to its parent
    pub transform: Transform3D,
    /// The node's kind
    pub kind: NodeKind,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
    dirty: DirtyFlags,
}

impl SceneNode {
    /// Create a node of the given kind at the origin
    pub fn new(kind: NodeKind) -> Self {
        Self {
            name: None,
            tags: HashSet::new(),
            transform: Transform3D::identity(),
            kind,
            parent: None,
            children: Vec::new(),
            dirty: DirtyFlags::ALL, // New nodes are dirty
        }
    }

    /// Create an empty group
    pub fn group() -> Self {
        Self::new(NodeKind::Group)
    }

    /// Create a mesh node
    pub fn mesh(shape: ShapeRef, material: Material) -> Self {
        Self::new(NodeKind::Mesh(MeshNode { shape, material }))
    }

    /// Create a light node
    pub fn light(light: Light) -> Self {
        Self::new(NodeKind::Light(light))
    }

    /// Create a helper node
    pub fn helper(helper: Helper) -> Self {
        Self::new(NodeKind::Helper(helper))
    }

    /// Create a camera node
    pub fn camera(camera: PerspectiveCamera) -> Self {
        Self::new(NodeKind::Camera(camera))
    }

    /// Set the name of this node
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a tag to this node
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Set the transform of this node
    pub fn with_transform(mut self, transform: Transform3D) -> Self {
        self.transform = transform;
        self
    }

    /// Set the position of this node
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    /// Check if this node has a specific tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// The node's name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Parent node key (None for roots)
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Child node keys in insertion order
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// Mesh data, if this is a mesh
    pub fn as_mesh(&self) -> Option<&MeshNode> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// Mutable mesh data, if this is a mesh
    pub fn as_mesh_mut(&mut self) -> Option<&mut MeshNode> {
        match &mut self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    // --- Dirty tracking methods ---

    /// Check if this node has any dirty flags set
    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Get the current dirty flags
    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    /// Mark this node as dirty with the given flags
    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    /// Clear all dirty flags
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = DirtyFlags::NONE;
    }

    /// Set the position and mark the transform as dirty
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }

    /// Rotate around a local axis and mark the transform as dirty
    pub fn rotate_local(&mut self, plane: ballsweep_math::RotationPlane, angle: f32) {
        self.transform.rotate_local(plane, angle);
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }

    /// Set the mesh color and mark the material as dirty
    ///
    /// Returns false (and changes nothing) for non-mesh nodes.
    pub fn set_color(&mut self, color: Color) -> bool {
        match self.as_mesh_mut() {
            Some(mesh) => {
                mesh.material.color = color;
                self.mark_dirty(DirtyFlags::MATERIAL);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballsweep_math::Sphere3D;

    fn ball() -> SceneNode {
        SceneNode::mesh(ShapeRef::shared(Sphere3D::new(0.3)), Material::lambert(Color::from_hex(0xED2F6A)))
    }

    #[test]
    fn test_material_rgba() {
        let opaque = Material::lambert(Color::WHITE);
        assert_eq!(opaque.rgba(), [1.0, 1.0, 1.0, 1.0]);

        let glass = Material::unlit(Color::WHITE).with_opacity(0.2);
        assert!(glass.transparent);
        assert_eq!(glass.shading, Shading::Unlit);
        assert_eq!(glass.rgba()[3], 0.2);
    }

    #[test]
    fn test_shared_shape_handles() {
        let sphere: Arc<dyn Shape3D> = Arc::new(Sphere3D::new(1.0));
        let a = ShapeRef::Shared(Arc::clone(&sphere));
        let b = ShapeRef::Shared(Arc::clone(&sphere));
        assert_eq!(a.as_shape().vertex_count(), b.as_shape().vertex_count());
        assert_eq!(Arc::strong_count(&sphere), 3);
    }

    #[test]
    fn test_new_node_is_dirty() {
        let node = ball();
        assert!(node.is_dirty());
        assert_eq!(node.dirty_flags(), DirtyFlags::ALL);
    }

    #[test]
    fn test_set_position_marks_dirty() {
        let mut node = ball();
        node.clear_dirty();
        node.set_position(Vec3::new(1.0, 2.0, 3.0));
        assert!(node.dirty_flags().contains(DirtyFlags::TRANSFORM));
        assert!(!node.dirty_flags().contains(DirtyFlags::MATERIAL));
        assert_eq!(node.transform.position.x, 1.0);
    }

    #[test]
    fn test_set_color_only_on_meshes() {
        let mut node = ball();
        node.clear_dirty();
        assert!(node.set_color(Color::WHITE));
        assert!(node.dirty_flags().contains(DirtyFlags::MATERIAL));
        assert_eq!(node.as_mesh().map(|m| m.material.color), Some(Color::WHITE));

        let mut group = SceneNode::group();
        group.clear_dirty();
        assert!(!group.set_color(Color::WHITE));
        assert!(!group.is_dirty());
    }

    #[test]
    fn test_builder_methods() {
        let node = ball().with_name("3").with_tag("ball").with_position(Vec3::new(-4.8, 0.5, -0.5));
        assert_eq!(node.name(), Some("3"));
        assert!(node.has_tag("ball"));
        assert_eq!(node.kind.label(), "mesh");
        assert_eq!(node.transform.position.x, -4.8);
    }
}
