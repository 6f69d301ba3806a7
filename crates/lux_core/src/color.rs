//! 8-bit RGBA color with saturating arithmetic.

use lux_math::Vec3;

/// An RGBA byte quad.
///
/// Colors are combined additively with per-channel saturation, so adding
/// any number of contributions never wraps past 255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Transparent black, the value of every pixel no ray hits.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Convert a unit-range RGB vector to an opaque color.
    ///
    /// Components are clamped to [0, 1] before scaling.
    pub fn from_unit_rgb(rgb: Vec3) -> Self {
        let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgb(to_byte(rgb.x), to_byte(rgb.y), to_byte(rgb.z))
    }

    /// Per-channel saturating add, alpha included.
    pub fn saturating_add(self, other: Color) -> Color {
        Color {
            r: self.r.saturating_add(other.r),
            g: self.g.saturating_add(other.g),
            b: self.b.saturating_add(other.b),
            a: self.a.saturating_add(other.a),
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl From<Color> for [u8; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}
