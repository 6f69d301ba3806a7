//! Pinhole camera for ray generation.

use lux_core::Scene;
use lux_math::{rotation_between, Mat3, Ray, Vec3};
use thiserror::Error;

use crate::{render, ImageBuffer, RenderConfig};

/// Forward axis of camera space. Rays are built looking down this axis and
/// then rotated onto the configured view direction.
pub const REFERENCE_FORWARD: Vec3 = Vec3::NEG_Z;

/// Normalized sensor width the focal length is derived from.
const SENSOR_WIDTH: f32 = 1.0;

/// Errors raised for invalid camera parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("Resolution must be non-zero, got {0}x{1}")]
    InvalidResolution(u32, u32),

    #[error("Horizontal field of view must be between 0 and 180 degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("Aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f32),

    #[error("View direction must be a finite, non-zero vector")]
    InvalidDirection,
}

/// Camera for generating one ray per pixel.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    resolution_x: u32,
    resolution_y: u32,

    // Camera positioning
    origin: Vec3,
    direction: Vec3,
    up: Vec3,

    // Lens settings
    fov_degrees: f32, // Horizontal field of view in degrees
    aspect_ratio: f32,

    // Derived values
    sensor_height: f32,
    focal_length: f32,
    rotation: Mat3,
}

impl Camera {
    /// Create a camera at `origin` looking along `direction`.
    ///
    /// `up` is recorded with the camera; the orientation of generated rays
    /// is fully determined by rotating the reference forward axis onto
    /// `direction`.
    pub fn new(
        origin: Vec3,
        direction: Vec3,
        up: Vec3,
        fov_degrees: f32,
        aspect_ratio: f32,
        resolution_x: u32,
        resolution_y: u32,
    ) -> Result<Self, CameraError> {
        if resolution_x == 0 || resolution_y == 0 {
            return Err(CameraError::InvalidResolution(resolution_x, resolution_y));
        }
        if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
            return Err(CameraError::InvalidFieldOfView(fov_degrees));
        }
        if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
            return Err(CameraError::InvalidAspectRatio(aspect_ratio));
        }
        let direction = direction
            .try_normalize()
            .ok_or(CameraError::InvalidDirection)?;

        // Half turns (looking straight back) spin about camera-space up
        let rotation = rotation_between(REFERENCE_FORWARD, direction, Vec3::Y);

        Ok(Self {
            resolution_x,
            resolution_y,
            origin,
            direction,
            up,
            fov_degrees,
            aspect_ratio,
            sensor_height: SENSOR_WIDTH / aspect_ratio,
            focal_length: Self::focal_length_for(SENSOR_WIDTH, fov_degrees),
            rotation,
        })
    }

    /// Distance from the pinhole to a sensor of `sensor_width` that spans
    /// `fov_degrees` horizontally.
    pub fn focal_length_for(sensor_width: f32, fov_degrees: f32) -> f32 {
        (sensor_width / 2.0) / (fov_degrees / 2.0).to_radians().tan()
    }

    /// Generate the ray through the center of pixel (x, y).
    ///
    /// Pixel (0, 0) is the top-left corner of the image.
    pub fn ray_for_pixel(&self, x: u32, y: u32) -> Ray {
        let ndc_x = (x as f32 + 0.5) / self.resolution_x as f32;
        let ndc_y = (y as f32 + 0.5) / self.resolution_y as f32;

        let mut screen_x = 2.0 * ndc_x - 1.0;
        let screen_y = 1.0 - 2.0 * ndc_y;
        screen_x *= self.aspect_ratio * SENSOR_WIDTH / self.sensor_height;

        let local = Vec3::new(screen_x, screen_y, -self.focal_length).normalize();
        Ray::new(self.origin, self.rotation * local)
    }

    /// One ray per pixel in row-major order.
    ///
    /// Ray `i` belongs to pixel [`Camera::pixel_of`]`(i)`.
    pub fn rays(&self) -> Vec<Ray> {
        let mut rays = Vec::with_capacity(self.pixel_count());
        for y in 0..self.resolution_y {
            for x in 0..self.resolution_x {
                rays.push(self.ray_for_pixel(x, y));
            }
        }
        rays
    }

    /// Pixel coordinates of the `index`-th ray from [`Camera::rays`].
    pub fn pixel_of(&self, index: usize) -> (u32, u32) {
        let width = self.resolution_x as usize;
        ((index % width) as u32, (index / width) as u32)
    }

    /// Render `scene` with the default configuration.
    pub fn render(&self, scene: &Scene) -> ImageBuffer {
        render(self, scene, &RenderConfig::default())
    }

    pub fn resolution(&self) -> (u32, u32) {
        (self.resolution_x, self.resolution_y)
    }

    pub fn pixel_count(&self) -> usize {
        self.resolution_x as usize * self.resolution_y as usize
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Normalized view direction.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn focal_length(&self) -> f32 {
        self.focal_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(direction: Vec3, width: u32, height: u32) -> Camera {
        Camera::new(Vec3::ZERO, direction, Vec3::Y, 90.0, 1.0, width, height).unwrap()
    }

    #[test]
    fn test_focal_length() {
        // 90 degrees over a unit sensor puts the sensor half a unit away
        assert!((Camera::focal_length_for(1.0, 90.0) - 0.5).abs() < 1e-6);
        // Narrower views push it further out
        assert!(Camera::focal_length_for(1.0, 30.0) > 1.0);
    }

    #[test]
    fn test_ray_count_and_order() {
        let cam = camera(Vec3::NEG_Z, 4, 3);
        let rays = cam.rays();

        assert_eq!(rays.len(), 12);
        for (i, ray) in rays.iter().enumerate() {
            let (x, y) = cam.pixel_of(i);
            assert_eq!(*ray, cam.ray_for_pixel(x, y));
        }
        assert_eq!(cam.pixel_of(5), (1, 1));
        assert_eq!(cam.pixel_of(11), (3, 2));
    }

    #[test]
    fn test_center_ray_follows_view_direction() {
        for direction in [Vec3::X, Vec3::NEG_Y, Vec3::new(1.0, 1.0, 1.0)] {
            // Odd resolution so the middle pixel is exactly on axis
            let cam = camera(direction, 9, 9);
            let ray = cam.ray_for_pixel(4, 4);

            assert_eq!(ray.origin, Vec3::ZERO);
            assert!(
                (ray.direction - direction.normalize()).length() < 1e-5,
                "center ray {:?} for direction {:?}",
                ray.direction,
                direction
            );
        }
    }

    #[test]
    fn test_screen_orientation() {
        let cam = camera(Vec3::NEG_Z, 10, 10);

        // Top-left pixel looks up and to the left
        let top_left = cam.ray_for_pixel(0, 0).direction;
        assert!(top_left.x < 0.0 && top_left.y > 0.0 && top_left.z < 0.0);

        // Bottom-right pixel looks down and to the right
        let bottom_right = cam.ray_for_pixel(9, 9).direction;
        assert!(bottom_right.x > 0.0 && bottom_right.y < 0.0);
    }

    #[test]
    fn test_wide_aspect_scales_screen_x() {
        // 90 degrees: focal 0.5, sensor height 0.5, x scale 2 * 1 / 0.5 = 4
        let cam = Camera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 90.0, 2.0, 4, 2).unwrap();
        let ray = cam.ray_for_pixel(0, 0);

        // ndc (0.125, 0.25) gives screen (-0.75, 0.5) before scaling
        let expected = Vec3::new(-0.75 * 4.0, 0.5, -0.5).normalize();
        assert!(
            (ray.direction - expected).length() < 1e-6,
            "got {:?}, expected {:?}",
            ray.direction,
            expected
        );
    }

    #[test]
    fn test_off_center_ray_uses_focal_length() {
        let cam = Camera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 60.0, 1.0, 4, 4).unwrap();
        let focal = 0.5 / 30f32.to_radians().tan();
        assert!((cam.focal_length() - focal).abs() < 1e-6);

        // ndc (0.875, 0.375) gives screen (0.75, 0.25)
        let ray = cam.ray_for_pixel(3, 1);
        let expected = Vec3::new(0.75, 0.25, -focal).normalize();
        assert!((ray.direction - expected).length() < 1e-6);
    }

    #[test]
    fn test_rays_are_unit_length() {
        let cam = camera(Vec3::new(0.3, -0.2, 0.9), 5, 7);
        for ray in cam.rays() {
            assert!((ray.direction.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_looking_down_reference_axis_needs_no_rotation() {
        let cam = camera(Vec3::NEG_Z, 9, 9);
        let ray = cam.ray_for_pixel(4, 4);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_looking_backwards_is_well_defined() {
        let cam = camera(Vec3::Z, 9, 9);

        for ray in cam.rays() {
            assert!(!ray.direction.is_nan());
        }
        let center = cam.ray_for_pixel(4, 4);
        assert!((center.direction - Vec3::Z).length() < 1e-5);
        // Up stays up
        assert!(cam.ray_for_pixel(4, 0).direction.y > 0.0);
    }

    #[test]
    fn test_invalid_parameters() {
        let new = |fov: f32, aspect: f32, w: u32, h: u32, dir: Vec3| {
            Camera::new(Vec3::ZERO, dir, Vec3::Y, fov, aspect, w, h)
        };

        assert_eq!(
            new(90.0, 1.0, 0, 10, Vec3::X).unwrap_err(),
            CameraError::InvalidResolution(0, 10)
        );
        assert!(matches!(
            new(180.0, 1.0, 10, 10, Vec3::X),
            Err(CameraError::InvalidFieldOfView(_))
        ));
        assert!(matches!(
            new(0.0, 1.0, 10, 10, Vec3::X),
            Err(CameraError::InvalidFieldOfView(_))
        ));
        assert!(matches!(
            new(90.0, -1.0, 10, 10, Vec3::X),
            Err(CameraError::InvalidAspectRatio(_))
        ));
        assert_eq!(
            new(90.0, 1.0, 10, 10, Vec3::ZERO).unwrap_err(),
            CameraError::InvalidDirection
        );
    }
}
