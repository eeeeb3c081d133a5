//! 24-bit RGB colors
//!
//! Colors are kept as packed `0xRRGGBB` integers so palette comparisons are
//! exact. Conversion to floats happens only when vertex data is built.

use serde::{Serialize, Deserialize};

/// A packed `0xRRGGBB` color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Self = Self(0x000000);
    pub const WHITE: Self = Self(0xFFFFFF);

    /// Create a color from a `0xRRGGBB` value (higher bits are ignored)
    #[inline]
    pub const fn from_hex(hex: u32) -> Self {
        Self(hex & 0x00FF_FFFF)
    }

    /// The packed `0xRRGGBB` value
    #[inline]
    pub const fn hex(self) -> u32 {
        self.0
    }

    /// Create a color from float components in `0.0..=1.0`
    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        Self((channel(r) << 16) | (channel(g) << 8) | channel(b))
    }

    /// Float components `[r, g, b]` in `0.0..=1.0`
    pub fn to_rgb(self) -> [f32; 3] {
        [
            ((self.0 >> 16) & 0xFF) as f32 / 255.0,
            ((self.0 >> 8) & 0xFF) as f32 / 255.0,
            (self.0 & 0xFF) as f32 / 255.0,
        ]
    }

    /// Float components with an alpha channel
    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        let [r, g, b] = self.to_rgb();
        [r, g, b, alpha]
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}
