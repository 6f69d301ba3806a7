//! Surface material.

use lux_math::Vec3;

use crate::Color;

/// A surface material.
///
/// Only the diffuse color takes part in shading. The scalar properties are
/// carried for scene descriptions and kept clamped to [0, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Diffuse/base color (RGB, 0-1)
    pub diffuse_color: Vec3,

    /// Reflectivity (0=none, 1=mirror)
    pub reflectivity: f32,

    /// Opacity (0=transparent, 1=opaque)
    pub opacity: f32,

    /// Diffuse response factor
    pub diffuse: f32,

    /// Roughness factor (0=smooth, 1=rough)
    pub roughness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_color: Vec3::ZERO,
            reflectivity: 0.0,
            opacity: 1.0,
            diffuse: 1.0,
            roughness: 0.0,
        }
    }
}

impl Material {
    /// Create a new material with just a diffuse color.
    pub fn new(diffuse_color: Vec3) -> Self {
        Self {
            diffuse_color: diffuse_color.clamp(Vec3::ZERO, Vec3::ONE),
            ..Default::default()
        }
    }

    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = unit(reflectivity);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = unit(opacity);
        self
    }

    pub fn with_diffuse(mut self, diffuse: f32) -> Self {
        self.diffuse = unit(diffuse);
        self
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = unit(roughness);
        self
    }

    /// The diffuse color as an opaque byte color, blended on top of the
    /// light contributions at every hit.
    pub fn base_color(&self) -> Color {
        Color::from_unit_rgb(self.diffuse_color)
    }
}

fn unit(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_black_and_opaque() {
        let m = Material::default();
        assert_eq!(m.base_color(), Color::BLACK);
        assert_eq!(m.opacity, 1.0);
    }

    #[test]
    fn test_scalars_are_clamped() {
        let m = Material::new(Vec3::new(2.0, 0.5, -1.0))
            .with_reflectivity(1.5)
            .with_opacity(-0.5)
            .with_diffuse(0.25)
            .with_roughness(f32::NAN);

        assert_eq!(m.diffuse_color, Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(m.reflectivity, 1.0);
        assert_eq!(m.opacity, 0.0);
        assert_eq!(m.diffuse, 0.25);
        assert_eq!(m.roughness, 0.0);
    }

    #[test]
    fn test_base_color() {
        let m = Material::new(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(m.base_color(), Color::rgb(255, 0, 0));
    }
}
