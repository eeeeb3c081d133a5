//! The group of moving balls
//!
//! A BallGroup is a group node whose children are sphere meshes named by
//! their sequential id ("0", "1", ...). The set of balls is fixed once the
//! group has been spawned.

use std::sync::Arc;
use ballsweep_math::{Shape3D, Vec3};
use crate::{Material, NodeKey, SceneGraph, SceneNode, ShapeRef};

/// Number of balls in the demo layout
pub const BALL_COUNT: usize = 9;

/// Tag carried by every ball mesh
pub const BALL_TAG: &str = "ball";

/// Handle to a spawned group of balls
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BallGroup {
    group: NodeKey,
    balls: Vec<NodeKey>,
}

impl BallGroup {
    /// Spawn a named ball group under `parent` (or at the top level)
    ///
    /// Ball `i` is a mesh named `"{i}"` at `positions[i]`, relative to the
    /// group. All balls share `shape` and start with `material`.
    pub fn spawn(
        scene: &mut SceneGraph,
        parent: Option<NodeKey>,
        name: &str,
        shape: Arc<dyn Shape3D>,
        material: Material,
        positions: &[Vec3],
    ) -> Option<Self> {
        let group_node = SceneNode::group().with_name(name);
        let group = match parent {
            Some(p) => scene.add_child(p, group_node)?,
            None => scene.add(group_node),
        };

        let mut balls = Vec::with_capacity(positions.len());
        for (i, &position) in positions.iter().enumerate() {
            let node = SceneNode::mesh(ShapeRef::Shared(Arc::clone(&shape)), material)
                .with_name(i.to_string())
                .with_tag(BALL_TAG)
                .with_position(position);
            balls.push(scene.add_child(group, node)?);
        }

        log::debug!("Spawned ball group '{}' with {} balls", name, balls.len());
        Some(Self { group, balls })
    }

    /// Key of the group node
    pub fn group(&self) -> NodeKey {
        self.group
    }

    /// Ball keys in creation order
    pub fn balls(&self) -> &[NodeKey] {
        &self.balls
    }

    /// Key of the most recently created ball
    pub fn last(&self) -> Option<NodeKey> {
        self.balls.last().copied()
    }

    /// Number of balls
    pub fn len(&self) -> usize {
        self.balls.len()
    }

    /// Check if the group has no balls
    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballsweep_math::Sphere3D;
    use crate::Color;

    #[test]
    fn test_spawn() {
        let mut scene = SceneGraph::new();
        let model = scene.add(SceneNode::group().with_name("model"));
        let positions: Vec<Vec3> = (0..BALL_COUNT).map(|i| Vec3::new(-4.8, i as f32, 0.0)).collect();

        let group = BallGroup::spawn(
            &mut scene,
            Some(model),
            "balls",
            Arc::new(Sphere3D::new(0.3)),
            Material::lambert(Color::from_hex(0xED2F6A)),
            &positions,
        )
        .unwrap();

        assert_eq!(group.len(), BALL_COUNT);
        assert_eq!(scene.get(group.group()).unwrap().parent(), Some(model));
        assert_eq!(scene.get(group.group()).unwrap().children(), group.balls());

        for (i, &key) in group.balls().iter().enumerate() {
            let node = scene.get(key).unwrap();
            assert_eq!(node.name(), Some(i.to_string().as_str()));
            assert!(node.has_tag(BALL_TAG));
            assert_eq!(node.transform.position.y, i as f32);
        }
        assert_eq!(group.last(), group.balls().last().copied());
    }
}
