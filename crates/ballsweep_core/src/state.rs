//! Simulation state
//!
//! Everything a frame reads or mutates lives here and is passed explicitly
//! to whoever runs the frame.

use ballsweep_math::RotationPlane;
use crate::{BallGroup, BallSweep, NodeKey, PerspectiveCamera, SceneGraph};

/// The scene plus handles to the nodes the frame loop animates
pub struct SimulationState {
    /// The scene graph
    pub scene: SceneGraph,
    /// The moving balls
    pub balls: BallGroup,
    /// Camera node used for rendering
    pub camera: NodeKey,
    /// Node given the small per-frame Y rotation
    pub spinner: Option<NodeKey>,
    /// Sweep rule applied to the balls
    pub sweep: BallSweep,
}

impl SimulationState {
    /// Bundle a scene with its animation handles
    ///
    /// The spinner defaults to the last ball created.
    pub fn new(scene: SceneGraph, balls: BallGroup, camera: NodeKey, sweep: BallSweep) -> Self {
        let spinner = balls.last();
        Self {
            scene,
            balls,
            camera,
            spinner,
            sweep,
        }
    }

    /// Builder: choose a different spinner node (or none)
    pub fn with_spinner(mut self, spinner: Option<NodeKey>) -> Self {
        self.spinner = spinner;
        self
    }

    /// Rotate the spinner node about its local Y axis
    ///
    /// Returns false when there is no spinner or its key is stale.
    pub fn spin(&mut self, angle: f32) -> bool {
        let Some(key) = self.spinner else { return false };
        match self.scene.get_mut(key) {
            Some(node) => {
                node.rotate_local(RotationPlane::XZ, angle);
                true
            }
            None => false,
        }
    }

    /// Advance every ball by one sweep step
    pub fn sweep(&mut self) -> usize {
        self.sweep.apply(&mut self.scene, self.balls.group())
    }

    /// Roots of the subtrees the frame loop moves
    ///
    /// The ball group, plus the spinner when it lives outside that group.
    pub fn animated_roots(&self) -> Vec<NodeKey> {
        let group = self.balls.group();
        let mut roots = vec![group];
        if let Some(spinner) = self.spinner {
            if !self.is_within(spinner, group) {
                roots.push(spinner);
            }
        }
        roots
    }

    /// Whether `key` is `ancestor` or one of its descendants
    fn is_within(&self, key: NodeKey, ancestor: NodeKey) -> bool {
        let mut current = Some(key);
        while let Some(k) = current {
            if k == ancestor {
                return true;
            }
            current = self.scene.get(k).and_then(|n| n.parent());
        }
        false
    }

    /// The render camera
    pub fn camera(&self) -> Option<&PerspectiveCamera> {
        self.scene.camera(self.camera)
    }

    /// The render camera, mutably
    pub fn camera_mut(&mut self) -> Option<&mut PerspectiveCamera> {
        self.scene.camera_mut(self.camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use ballsweep_math::{Sphere3D, Vec3};
    use crate::{Material, SceneNode, PALETTE_B};

    fn state() -> SimulationState {
        let mut scene = SceneGraph::new();
        let camera = scene.add(SceneNode::camera(PerspectiveCamera::default()));
        let balls = BallGroup::spawn(
            &mut scene,
            None,
            "balls",
            Arc::new(Sphere3D::with_segments(0.3, 4, 3)),
            Material::lambert(PALETTE_B),
            &[Vec3::new(-4.8, 0.5, -0.5), Vec3::new(-4.8, 1.5, 0.5)],
        )
        .unwrap();
        SimulationState::new(scene, balls, camera, BallSweep::default())
    }

    #[test]
    fn test_spinner_is_last_ball() {
        let state = state();
        assert_eq!(state.spinner, state.balls.last());
        assert!(state.camera().is_some());
    }

    #[test]
    fn test_spin_rotates_about_y() {
        let mut state = state();
        let key = state.spinner.unwrap();
        let before = state.scene.get(key).unwrap().transform;
        assert!(state.spin(0.001));
        let after = state.scene.get(key).unwrap().transform;
        assert_eq!(before.position, after.position);
        assert_ne!(before.rotation, after.rotation);
        // Y axis is preserved by a Y rotation
        let y = after.transform_direction(Vec3::Y);
        assert!((y - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_spin_without_spinner() {
        let mut state = state().with_spinner(None);
        assert!(!state.spin(0.001));
    }

    #[test]
    fn test_sweep_moves_every_ball() {
        let mut state = state();
        assert_eq!(state.sweep(), 2);
        for &key in state.balls.balls() {
            let x = state.scene.get(key).unwrap().transform.position.x;
            assert!((x + 4.7).abs() < 1e-5);
        }
    }

    #[test]
    fn test_animated_roots() {
        let state = state();
        assert_eq!(state.animated_roots(), vec![state.balls.group()]);

        let mut state = state;
        let outside = state.scene.add(SceneNode::group());
        let state = state.with_spinner(Some(outside));
        assert_eq!(state.animated_roots(), vec![state.balls.group(), outside]);
    }
}
