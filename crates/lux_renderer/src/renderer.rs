//! Core ray casting renderer.
//!
//! Casts one ray per pixel, finds the nearest face hit by brute force and
//! shades it with:
//! - the saturating sum of every light's contribution
//! - the hit material's base color blended on top

use std::time::Instant;

use lux_core::{Color, Intersection, Scene};
use lux_math::Ray;

use crate::bucket::{render_buckets, DEFAULT_BUCKET_SIZE};
use crate::Camera;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Color of pixels whose ray hits nothing
    pub background: Color,
    /// Render buckets in parallel instead of a single row-major pass
    pub parallel: bool,
    /// Edge length of a bucket in pixels (parallel rendering only)
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: Color::TRANSPARENT,
            parallel: false,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

/// Final color of a hit: every light's contribution, then the material's
/// base color, all combined with saturating addition.
pub fn shade_hit(scene: &Scene, hit: &Intersection) -> Color {
    let mesh = hit.geometry.geometry_data();

    let lit = scene
        .lights()
        .iter()
        .fold(Color::TRANSPARENT, |acc, light| {
            acc.saturating_add(light.shade(mesh, hit.point, hit.face))
        });

    lit.saturating_add(hit.material.base_color())
}

/// Compute the color seen by a ray.
pub fn ray_color(ray: &Ray, scene: &Scene, background: Color) -> Color {
    match scene.intersect(ray) {
        Some(hit) => shade_hit(scene, &hit),
        None => background,
    }
}

/// Render a single pixel.
pub fn render_pixel(camera: &Camera, scene: &Scene, x: u32, y: u32, config: &RenderConfig) -> Color {
    let ray = camera.ray_for_pixel(x, y);
    ray_color(&ray, scene, config.background)
}

/// RGBA image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_array()).collect()
    }
}

/// Render the entire scene to an image buffer.
///
/// The render always completes; no partial image is produced.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let (width, height) = camera.resolution();

    if scene.geometries().is_empty() {
        log::warn!("Scene has no geometry; the image will be background only");
    } else if scene.lights().is_empty() {
        log::warn!("Scene has no lights; surfaces show their base color only");
    }

    log::info!(
        "Rendering {}x{}: {} triangles, {} lights ({})",
        width,
        height,
        scene.total_triangle_count(),
        scene.lights().len(),
        if config.parallel { "parallel" } else { "single-threaded" }
    );

    let start = Instant::now();
    let image = if config.parallel {
        render_buckets(camera, scene, config)
    } else {
        render_sequential(camera, scene, config)
    };

    log::info!("Rendered in {:?}", start.elapsed());
    image
}

/// One pass over the camera's rays in row-major order.
fn render_sequential(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let (width, height) = camera.resolution();
    let mut image = ImageBuffer::new(width, height, config.background);

    for (i, ray) in camera.rays().iter().enumerate() {
        if let Some(hit) = scene.intersect(ray) {
            let (x, y) = camera.pixel_of(i);
            image.set(x, y, shade_hit(scene, &hit));
        }
    }

    image
}
