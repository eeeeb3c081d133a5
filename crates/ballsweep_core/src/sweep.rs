//! Per-frame ball sweep
//!
//! Every frame each ball moves `step` along +X. Once a ball is past
//! `end_point` it snaps back to `start_point` on the next frame. After
//! moving, balls at or left of the midpoint turn [`PALETTE_A`]; balls right
//! of it turn [`PALETTE_B`] if their id is even and otherwise keep whatever
//! color they already had.
//!
//! Sweep coordinates are carried in f64 and only narrowed to f32 when
//! written into a transform, so accumulated steps land on the same frames
//! a double-precision sweep would.

use slotmap::SecondaryMap;

use crate::{Color, DirtyFlags, NodeKey, SceneGraph, SceneNode};

/// Color for balls in the left half of the sweep
pub const PALETTE_A: Color = Color::from_hex(0xE2D849);
/// Color for even balls in the right half of the sweep
pub const PALETTE_B: Color = Color::from_hex(0xED2F6A);

/// Invalid sweep bounds
#[derive(Debug, Clone, PartialEq)]
pub enum SweepBoundsError {
    /// `start_point` is not strictly less than `end_point`
    InvertedBounds { start_point: f64, end_point: f64 },
    /// `step` is zero, negative, or NaN
    NonPositiveStep(f64),
}

impl std::fmt::Display for SweepBoundsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SweepBoundsError::InvertedBounds { start_point, end_point } => write!(
                f,
                "Sweep start point {} must be less than end point {}",
                start_point, end_point
            ),
            SweepBoundsError::NonPositiveStep(step) => {
                write!(f, "Sweep step must be positive, got {}", step)
            }
        }
    }
}

impl std::error::Error for SweepBoundsError {}

/// Where the sweep starts, where it wraps, and how far a ball moves per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepBounds {
    start_point: f64,
    end_point: f64,
    step: f64,
}

impl Default for SweepBounds {
    fn default() -> Self {
        Self {
            start_point: -10.0,
            end_point: 10.0,
            step: 0.1,
        }
    }
}

impl SweepBounds {
    /// Validate and create sweep bounds
    pub fn new(start_point: f64, end_point: f64, step: f64) -> Result<Self, SweepBoundsError> {
        // Written so NaN fails both checks
        if !(start_point < end_point) {
            return Err(SweepBoundsError::InvertedBounds { start_point, end_point });
        }
        if !(step > 0.0) {
            return Err(SweepBoundsError::NonPositiveStep(step));
        }
        Ok(Self { start_point, end_point, step })
    }

    pub fn start_point(&self) -> f64 {
        self.start_point
    }

    pub fn end_point(&self) -> f64 {
        self.end_point
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// The color threshold, halfway between start and end
    pub fn midpoint(&self) -> f64 {
        (self.start_point + self.end_point) / 2.0
    }

    /// X after one frame: reset past the end, otherwise advance
    ///
    /// The reset is strictly greater-than, so a ball sitting exactly on
    /// `end_point` still advances once more.
    pub fn next_x(&self, x: f64) -> f64 {
        if x > self.end_point {
            self.start_point
        } else {
            x + self.step
        }
    }

    /// Color after one frame, from the already-updated x
    ///
    /// `None` means the color is left unchanged.
    pub fn next_color(&self, x: f64, id: Option<&str>) -> Option<Color> {
        if x <= self.midpoint() {
            Some(PALETTE_A)
        } else if ball_id(id).is_some_and(|n| n % 2 == 0) {
            Some(PALETTE_B)
        } else {
            None
        }
    }
}

/// Numeric id of a ball from its text name
///
/// Names that are missing or not an integer have no id.
pub fn ball_id(name: Option<&str>) -> Option<i64> {
    name?.trim().parse().ok()
}

/// Widen a transform coordinate to the decimal it was written from
///
/// Goes through the shortest round-trip text form, so `-4.8f32` becomes
/// `-4.8` rather than `-4.800000190734863`.
fn widen(x: f32) -> f64 {
    x.to_string().parse().unwrap_or(x as f64)
}

/// Applies the sweep to every mesh in a ball group
///
/// Keeps each ball's x in f64 between frames. A tracked value is dropped
/// and re-read from the transform if something else moved the ball.
#[derive(Debug, Clone, Default)]
pub struct BallSweep {
    bounds: SweepBounds,
    sweep_x: SecondaryMap<NodeKey, f64>,
}

impl BallSweep {
    /// Create a sweep with the given bounds
    pub fn new(bounds: SweepBounds) -> Self {
        Self {
            bounds,
            sweep_x: SecondaryMap::new(),
        }
    }

    /// The bounds this sweep uses
    pub fn bounds(&self) -> &SweepBounds {
        &self.bounds
    }

    /// The full-precision x tracked for a ball, if it has been swept
    pub fn sweep_x(&self, key: NodeKey) -> Option<f64> {
        self.sweep_x.get(key).copied()
    }

    /// Current x for a node, preferring the tracked value while the
    /// transform still matches it
    fn current_x(&self, key: NodeKey, node: &SceneNode) -> f64 {
        let x = node.transform.position.x;
        match self.sweep_x.get(key) {
            Some(&tracked) if tracked as f32 == x => tracked,
            _ => widen(x),
        }
    }

    /// Sweep one node
    ///
    /// Returns false for non-mesh nodes, which are left untouched.
    pub fn sweep_node(&mut self, key: NodeKey, node: &mut SceneNode) -> bool {
        if node.as_mesh().is_none() {
            return false;
        }

        let x = self.current_x(key, node);
        let wrapped = x > self.bounds.end_point;
        let next = self.bounds.next_x(x);
        self.sweep_x.insert(key, next);

        let mut position = node.transform.position;
        position.x = next as f32;
        node.set_position(position);
        if wrapped {
            log::debug!("Ball {:?} wrapped to {}", node.name(), next);
        }

        if let Some(color) = self.bounds.next_color(next, node.name()) {
            node.set_color(color);
        } else {
            // Still flagged so a retained color is re-uploaded with the new position
            node.mark_dirty(DirtyFlags::MATERIAL);
        }
        true
    }

    /// Sweep every mesh under `group` (the group itself included)
    ///
    /// Returns the number of meshes updated.
    pub fn apply(&mut self, scene: &mut SceneGraph, group: NodeKey) -> usize {
        let mut swept = 0;
        for key in scene.descendants(group) {
            if let Some(node) = scene.get_mut(key) {
                if self.sweep_node(key, node) {
                    swept += 1;
                }
            }
        }
        swept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, ShapeRef};
    use ballsweep_math::{Sphere3D, Vec3};

    fn ball(id: &str, x: f32, color: Color) -> SceneNode {
        SceneNode::mesh(ShapeRef::shared(Sphere3D::with_segments(0.3, 4, 3)), Material::lambert(color))
            .with_name(id)
            .with_position(Vec3::new(x, 1.5, -0.5))
    }

    fn color_of(node: &SceneNode) -> Color {
        node.as_mesh().map(|m| m.material.color).unwrap()
    }

    #[test]
    fn test_bounds_validation() {
        assert!(SweepBounds::new(-10.0, 10.0, 0.1).is_ok());
        assert_eq!(
            SweepBounds::new(10.0, -10.0, 0.1),
            Err(SweepBoundsError::InvertedBounds { start_point: 10.0, end_point: -10.0 })
        );
        assert!(SweepBounds::new(5.0, 5.0, 0.1).is_err());
        assert_eq!(SweepBounds::new(-1.0, 1.0, 0.0), Err(SweepBoundsError::NonPositiveStep(0.0)));
        assert!(SweepBounds::new(-1.0, 1.0, f64::NAN).is_err());
        assert!(SweepBounds::new(f64::NAN, 1.0, 0.1).is_err());
    }

    #[test]
    fn test_default_bounds() {
        let bounds = SweepBounds::default();
        assert_eq!(bounds, SweepBounds::new(-10.0, 10.0, 0.1).unwrap());
        assert_eq!(bounds.midpoint(), 0.0);
    }

    #[test]
    fn test_next_x() {
        let bounds = SweepBounds::default();
        assert!((bounds.next_x(5.0) - 5.1).abs() < 1e-12);
        assert_eq!(bounds.next_x(10.05), -10.0);
        // Exactly on the end point advances instead of resetting
        assert!((bounds.next_x(10.0) - 10.1).abs() < 1e-12);
    }

    #[test]
    fn test_next_color() {
        let bounds = SweepBounds::default();
        assert_eq!(bounds.next_color(0.0, Some("1")), Some(PALETTE_A));
        assert_eq!(bounds.next_color(-3.0, None), Some(PALETTE_A));
        assert_eq!(bounds.next_color(0.1, Some("4")), Some(PALETTE_B));
        assert_eq!(bounds.next_color(0.1, Some("3")), None);
        assert_eq!(bounds.next_color(0.1, Some("ball")), None);
        assert_eq!(bounds.next_color(0.1, None), None);
    }

    #[test]
    fn test_ball_id() {
        assert_eq!(ball_id(Some("8")), Some(8));
        assert_eq!(ball_id(Some(" 2 ")), Some(2));
        assert_eq!(ball_id(Some("-3")), Some(-3));
        assert_eq!(ball_id(Some("")), None);
        assert_eq!(ball_id(Some("2.5")), None);
        assert_eq!(ball_id(None), None);
    }

    #[test]
    fn test_negative_odd_id_falls_through() {
        let bounds = SweepBounds::default();
        assert_eq!(bounds.next_color(1.0, Some("-3")), None);
        assert_eq!(bounds.next_color(1.0, Some("-4")), Some(PALETTE_B));
    }

    /// A scene holding just `node`, and its key
    fn single(node: SceneNode) -> (SceneGraph, NodeKey) {
        let mut scene = SceneGraph::new();
        let key = scene.add(node);
        (scene, key)
    }

    fn sweep_once(sweep: &mut BallSweep, scene: &mut SceneGraph, key: NodeKey) -> bool {
        let node = scene.get_mut(key).unwrap();
        sweep.sweep_node(key, node)
    }

    fn x_of(scene: &SceneGraph, key: NodeKey) -> f32 {
        scene.get(key).unwrap().transform.position.x
    }

    #[test]
    fn test_sweep_node_even_past_midpoint() {
        let mut sweep = BallSweep::default();
        let (mut scene, key) = single(ball("0", 9.95, PALETTE_A));
        assert!(sweep_once(&mut sweep, &mut scene, key));
        assert!((x_of(&scene, key) - 10.05).abs() < 1e-5);
        assert_eq!(color_of(scene.get(key).unwrap()), PALETTE_B);
    }

    #[test]
    fn test_sweep_node_wraps() {
        let mut sweep = BallSweep::default();
        let (mut scene, key) = single(ball("1", 10.05, PALETTE_B));
        sweep_once(&mut sweep, &mut scene, key);
        assert_eq!(x_of(&scene, key), -10.0);
        assert_eq!(sweep.sweep_x(key), Some(-10.0));
        assert_eq!(color_of(scene.get(key).unwrap()), PALETTE_A);
    }

    #[test]
    fn test_sweep_node_odd_keeps_color() {
        let mut sweep = BallSweep::default();
        let (mut scene, key) = single(ball("3", 5.0, PALETTE_A));
        scene.clear_all_dirty();
        sweep_once(&mut sweep, &mut scene, key);
        let node = scene.get(key).unwrap();
        assert!((node.transform.position.x - 5.1).abs() < 1e-5);
        assert_eq!(color_of(node), PALETTE_A);
        assert!(node.dirty_flags().contains(DirtyFlags::TRANSFORM));
    }

    #[test]
    fn test_sweep_skips_non_meshes() {
        let mut sweep = BallSweep::default();
        let (mut scene, key) = single(SceneNode::group().with_position(Vec3::new(3.0, 0.0, 0.0)));
        scene.clear_all_dirty();
        assert!(!sweep_once(&mut sweep, &mut scene, key));
        assert_eq!(x_of(&scene, key), 3.0);
        assert!(!scene.get(key).unwrap().is_dirty());
        assert_eq!(sweep.sweep_x(key), None);
    }

    #[test]
    fn test_lap_from_start_takes_202_frames() {
        let mut sweep = BallSweep::default();
        let (mut scene, key) = single(ball("0", -10.0, PALETTE_A));

        let mut frames = 0;
        loop {
            sweep_once(&mut sweep, &mut scene, key);
            frames += 1;
            if x_of(&scene, key) == -10.0 {
                break;
            }
            assert!(frames < 1000, "ball never wrapped");
        }
        assert_eq!(frames, 202);
    }

    #[test]
    fn test_start_seeds_from_written_decimal() {
        let mut sweep = BallSweep::default();
        let (mut scene, key) = single(ball("0", -4.8, PALETTE_A));
        sweep_once(&mut sweep, &mut scene, key);
        assert_eq!(sweep.sweep_x(key), Some(-4.8 + 0.1));
    }

    #[test]
    fn test_moved_ball_is_reseeded() {
        let mut sweep = BallSweep::default();
        let (mut scene, key) = single(ball("0", 0.0, PALETTE_A));
        sweep_once(&mut sweep, &mut scene, key);

        scene.get_mut(key).unwrap().transform.position.x = 7.5;
        sweep_once(&mut sweep, &mut scene, key);
        assert_eq!(sweep.sweep_x(key), Some(7.5 + 0.1));
        assert_eq!(x_of(&scene, key), (7.5f64 + 0.1) as f32);
    }

    #[test]
    fn test_apply_walks_group() {
        let mut scene = SceneGraph::new();
        let group = scene.add(SceneNode::group());
        let a = scene.add_child(group, ball("0", -4.8, PALETTE_B)).unwrap();
        let b = scene.add_child(group, ball("1", 11.0, PALETTE_B)).unwrap();
        let outside = scene.add(ball("2", 0.0, PALETTE_B));

        let mut sweep = BallSweep::default();
        assert_eq!(sweep.apply(&mut scene, group), 2);
        assert!((scene.get(a).unwrap().transform.position.x + 4.7).abs() < 1e-5);
        assert_eq!(scene.get(b).unwrap().transform.position.x, -10.0);
        assert_eq!(scene.get(outside).unwrap().transform.position.x, 0.0);
        // Group transform is not swept
        assert_eq!(scene.get(group).unwrap().transform.position.x, 0.0);
    }
}
