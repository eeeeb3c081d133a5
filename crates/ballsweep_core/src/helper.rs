//! Debug helpers drawn as colored line segments

use ballsweep_math::Vec3;
use crate::Color;

/// One end of a helper line segment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineVertex {
    pub position: Vec3,
    pub color: [f32; 3],
}

impl LineVertex {
    fn new(position: Vec3, color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

/// A debug helper
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Helper {
    /// X/Y/Z axes from the origin, each `size` long
    ///
    /// X is red, Y is green, Z is blue, each fading slightly towards its tip.
    Axes { size: f32 },
    /// A square grid in the XZ plane
    Grid {
        /// Edge length of the whole grid
        size: f32,
        /// Cells per side
        divisions: u32,
        /// Color of the two center lines
        center_color: Color,
        /// Color of every other line
        grid_color: Color,
    },
}

impl Helper {
    /// Line list vertices (two per segment) in the helper's local space
    pub fn line_vertices(&self) -> Vec<LineVertex> {
        match *self {
            Helper::Axes { size } => {
                let axes = [
                    (Vec3::X, [1.0, 0.0, 0.0], [1.0, 0.6, 0.0]),
                    (Vec3::Y, [0.0, 1.0, 0.0], [0.6, 1.0, 0.0]),
                    (Vec3::Z, [0.0, 0.0, 1.0], [0.0, 0.6, 1.0]),
                ];
                axes.iter()
                    .flat_map(|&(dir, base, tip)| {
                        [LineVertex::new(Vec3::ZERO, base), LineVertex::new(dir * size, tip)]
                    })
                    .collect()
            }
            Helper::Grid { size, divisions, center_color, grid_color } => {
                let divisions = divisions.max(1);
                let center = divisions / 2;
                let step = size / divisions as f32;
                let half = size / 2.0;

                let mut vertices = Vec::with_capacity(4 * (divisions as usize + 1));
                for i in 0..=divisions {
                    let k = -half + i as f32 * step;
                    let color = if i == center { center_color } else { grid_color }.to_rgb();
                    vertices.push(LineVertex::new(Vec3::new(-half, 0.0, k), color));
                    vertices.push(LineVertex::new(Vec3::new(half, 0.0, k), color));
                    vertices.push(LineVertex::new(Vec3::new(k, 0.0, -half), color));
                    vertices.push(LineVertex::new(Vec3::new(k, 0.0, half), color));
                }
                vertices
            }
        }
    }

    /// Number of line segments the helper draws
    pub fn segment_count(&self) -> usize {
        match *self {
            Helper::Axes { .. } => 3,
            Helper::Grid { divisions, .. } => 2 * (divisions.max(1) as usize + 1),
        }
    }
}
