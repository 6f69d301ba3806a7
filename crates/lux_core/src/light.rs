//! Point lights and the per-hit shading model.
//!
//! Shading is additive: each light contributes
//! `light_color * cos_theta * intensity / attenuation` per channel, clamped
//! to a byte. There is no energy conservation.

use lux_math::{Interval, Vec3};

use crate::error::SceneError;
use crate::{Color, Face, Mesh};

const CHANNEL_RANGE: Interval = Interval {
    min: 0.0,
    max: 255.0,
};

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    position: Vec3,
    color: Color,
    intensity: f32,
    attenuation: f32,
}

impl Light {
    /// Create a point light.
    ///
    /// Attenuation divides the contribution, so it must be positive and
    /// finite. Intensity must be finite.
    pub fn new(
        position: Vec3,
        color: Color,
        intensity: f32,
        attenuation: f32,
    ) -> Result<Self, SceneError> {
        if !(attenuation.is_finite() && attenuation > 0.0) {
            return Err(SceneError::InvalidAttenuation(attenuation));
        }
        if !intensity.is_finite() {
            return Err(SceneError::InvalidIntensity(intensity));
        }
        Ok(Self {
            position,
            color,
            intensity,
            attenuation,
        })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn attenuation(&self) -> f32 {
        self.attenuation
    }

    /// Contribution of this light at `point` on `face` of `mesh`.
    ///
    /// The surface normal is interpolated from the face's corner normals.
    /// Faces without usable normals receive nothing.
    pub fn shade(&self, mesh: &Mesh, point: Vec3, face: &Face) -> Color {
        match face.interpolated_normal(point, mesh.vertices(), mesh.normals()) {
            Some(normal) => self.contribution(point, normal),
            None => Color::TRANSPARENT,
        }
    }

    /// Lambertian term for a unit `normal` at `point`.
    ///
    /// RGB is scaled and clamped to [0, 255]; alpha is the light's own.
    pub fn contribution(&self, point: Vec3, normal: Vec3) -> Color {
        let light_dir = (self.position - point).normalize_or_zero();
        let cos_theta = normal.dot(light_dir).max(0.0);
        let scale = cos_theta * self.intensity / self.attenuation;

        let channel = |c: u8| CHANNEL_RANGE.clamp(c as f32 * scale) as u8;
        Color::rgba(
            channel(self.color.r),
            channel(self.color.g),
            channel(self.color.b),
            self.color.a,
        )
    }
}
