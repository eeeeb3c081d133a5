//! Scene graph
//!
//! The SceneGraph owns every node in a slot map and keeps the parent/child
//! hierarchy. Keys are generational, so a stale key never aliases a newer
//! node.

use slotmap::{new_key_type, SlotMap};
use crate::{NodeKind, PerspectiveCamera, SceneNode, Transform3D};

new_key_type! {
    /// Generational key to a node in the scene graph
    pub struct NodeKey;
}

/// A tree of scene nodes
#[derive(Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, SceneNode>,
    roots: Vec<NodeKey>,
}

impl SceneGraph {
    /// Create an empty scene graph
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
        }
    }

    /// Add a node at the top level
    pub fn add(&mut self, mut node: SceneNode) -> NodeKey {
        node.parent = None;
        let key = self.nodes.insert(node);
        self.roots.push(key);
        key
    }

    /// Add a node as the last child of `parent`
    ///
    /// Returns `None` (and drops the node) if `parent` is not in the graph.
    pub fn add_child(&mut self, parent: NodeKey, mut node: SceneNode) -> Option<NodeKey> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        node.parent = Some(parent);
        let key = self.nodes.insert(node);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(key);
        }
        Some(key)
    }

    /// Get a node by key
    pub fn get(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    /// Get a mutable node by key
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut SceneNode> {
        self.nodes.get_mut(key)
    }

    /// Look up the first node with the given name
    pub fn find_by_name(&self, name: &str) -> Option<NodeKey> {
        self.nodes
            .iter()
            .find(|(_, node)| node.name() == Some(name))
            .map(|(key, _)| key)
    }

    /// Top-level node keys in insertion order
    pub fn roots(&self) -> &[NodeKey] {
        &self.roots
    }

    /// Number of nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph has no nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes (unordered)
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &SceneNode)> {
        self.nodes.iter()
    }

    /// `key` and all of its descendants, depth-first, parents before children
    ///
    /// Returns an empty list for unknown keys.
    pub fn descendants(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut out = Vec::new();
        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            if let Some(node) = self.nodes.get(k) {
                out.push(k);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Visit every node depth-first with its accumulated world transform
    pub fn traverse<F>(&self, mut visit: F)
    where
        F: FnMut(NodeKey, &SceneNode, &Transform3D),
    {
        let mut stack: Vec<(NodeKey, Transform3D)> = self
            .roots
            .iter()
            .rev()
            .map(|&k| (k, Transform3D::identity()))
            .collect();

        while let Some((key, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get(key) else { continue };
            let world = parent_world.compose(&node.transform);
            visit(key, node, &world);
            for &child in node.children.iter().rev() {
                stack.push((child, world));
            }
        }
    }

    /// World transform of a node (its transform composed with every ancestor's)
    pub fn world_transform(&self, key: NodeKey) -> Option<Transform3D> {
        let mut node = self.nodes.get(key)?;
        let mut world = node.transform;
        while let Some(parent) = node.parent.and_then(|p| self.nodes.get(p)) {
            world = parent.transform.compose(&world);
            node = parent;
        }
        Some(world)
    }

    /// Camera data of a camera node
    pub fn camera(&self, key: NodeKey) -> Option<&PerspectiveCamera> {
        match &self.nodes.get(key)?.kind {
            NodeKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    /// Mutable camera data of a camera node
    pub fn camera_mut(&mut self, key: NodeKey) -> Option<&mut PerspectiveCamera> {
        match &mut self.nodes.get_mut(key)?.kind {
            NodeKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    /// Check whether any node needs its GPU data rebuilt
    pub fn has_dirty_nodes(&self) -> bool {
        self.nodes.values().any(|n| n.is_dirty())
    }

    /// Clear dirty flags on every node
    pub fn clear_all_dirty(&mut self) {
        for node in self.nodes.values_mut() {
            node.clear_dirty();
        }
    }

    /// Count nodes of each kind, as `(groups, meshes, lights, helpers, cameras)`
    pub fn kind_counts(&self) -> (usize, usize, usize, usize, usize) {
        self.nodes.values().fold((0, 0, 0, 0, 0), |mut c, node| {
            match node.kind {
                NodeKind::Group => c.0 += 1,
                NodeKind::Mesh(_) => c.1 += 1,
                NodeKind::Light(_) => c.2 += 1,
                NodeKind::Helper(_) => c.3 += 1,
                NodeKind::Camera(_) => c.4 += 1,
            }
            c
        })
    }
}
