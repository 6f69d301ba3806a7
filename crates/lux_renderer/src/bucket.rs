//! Bucket-based tile rendering for Lux.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon, then copied into the final image.

use rayon::prelude::*;

use lux_core::{Color, Scene};

use crate::renderer::render_pixel;
use crate::{Camera, ImageBuffer, RenderConfig};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets for an image, sorted in spiral order from center.
///
/// A `bucket_size` of zero is treated as one.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh));
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);
    buckets
}

/// Sort buckets by distance from image center, nearest first.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f32 + b.width as f32 / 2.0;
        let by = b.y as f32 + b.height as f32 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| {
        distance(a)
            .partial_cmp(&distance(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = render_pixel(camera, scene, bucket.x + local_x, bucket.y + local_y, config);
            pixels.push(color);
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy this bucket's pixels into `image`.
    pub fn blit(&self, image: &mut ImageBuffer) {
        let width = self.bucket.width as usize;
        for (row, chunk) in self.pixels.chunks(width).enumerate() {
            for (col, &color) in chunk.iter().enumerate() {
                image.set(self.bucket.x + col as u32, self.bucket.y + row as u32, color);
            }
        }
    }
}

/// Render every bucket in parallel and assemble the image.
pub fn render_buckets(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let (width, height) = camera.resolution();
    let buckets = generate_buckets(width, height, config.bucket_size);

    log::debug!(
        "Rendering {} buckets of {}px on {} threads",
        buckets.len(),
        config.bucket_size.max(1),
        rayon::current_num_threads()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| BucketResult::new(*bucket, render_bucket(bucket, camera, scene, config)))
        .collect();

    let mut image = ImageBuffer::new(width, height, config.background);
    for result in &results {
        result.blit(&mut image);
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_core::{Light, Material, Mesh};
    use lux_math::Vec3;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 100, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid with partial buckets

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 100);
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9); // 3x3 grid

        // First bucket should be the center one
        let first = &buckets[0];
        assert_eq!((first.x, first.y), (64, 64));

        // Edge buckets come before corner buckets
        let corner = |b: &Bucket| b.x != 64 && b.y != 64;
        assert!(buckets[1..5].iter().all(|b| !corner(b)));
        assert!(buckets[5..].iter().all(corner));
    }

    #[test]
    fn test_zero_bucket_size() {
        let buckets = generate_buckets(3, 2, 0);
        assert_eq!(buckets.len(), 6);
    }

    #[test]
    fn test_bucket_matches_full_image() {
        let sphere = Mesh::sphere(Vec3::new(0.0, 0.0, -4.0), 1.0, 16, 8, Material::new(Vec3::X));
        let light = Light::new(Vec3::new(0.0, 4.0, 0.0), Color::WHITE, 1.0, 1.0).unwrap();
        let mut scene = Scene::new();
        scene.add_geometry(&sphere);
        scene.add_light(&light);

        let camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 60.0, 1.0, 12, 10).unwrap();
        let config = RenderConfig::default();
        let bucket = Bucket::new(3, 2, 5, 4);

        let mut image = ImageBuffer::new(12, 10, config.background);
        BucketResult::new(bucket, render_bucket(&bucket, &camera, &scene, &config)).blit(&mut image);

        for y in 0..10 {
            for x in 0..12 {
                let inside = (3..8).contains(&x) && (2..6).contains(&y);
                let expected = if inside {
                    render_pixel(&camera, &scene, x, y, &config)
                } else {
                    config.background
                };
                assert_eq!(image.get(x, y), expected, "pixel ({x}, {y})");
            }
        }
    }
}
