//! Lux Renderer - CPU ray casting
//!
//! Generates one primary ray per pixel from a pinhole camera, finds the
//! nearest triangle in a [`lux_core::Scene`] and shades it with the scene's
//! point lights. Images can be rendered in a single pass or in parallel
//! buckets, and written out as PNG.

mod bucket;
mod camera;
pub mod output;
mod renderer;

pub use bucket::{
    generate_buckets, render_bucket, render_buckets, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use camera::{Camera, CameraError, REFERENCE_FORWARD};
pub use output::OutputError;
pub use renderer::{ray_color, render, render_pixel, shade_hit, ImageBuffer, RenderConfig};

/// Re-export the core color type used in rendered images
pub use lux_core::Color;
pub use lux_math::{Ray, Vec3};
