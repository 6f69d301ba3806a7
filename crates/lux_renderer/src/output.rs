//! PNG output for rendered images.

use std::path::Path;

use image::{ImageFormat, RgbaImage};
use thiserror::Error;

use crate::ImageBuffer;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel buffer holds {len} bytes, expected {width}x{height}x4")]
    BufferSize { width: u32, height: u32, len: usize },
}

impl ImageBuffer {
    /// Convert to an `image` crate RGBA image.
    pub fn to_rgba_image(&self) -> Result<RgbaImage, OutputError> {
        let bytes = self.to_rgba();
        let len = bytes.len();
        RgbaImage::from_raw(self.width, self.height, bytes).ok_or(OutputError::BufferSize {
            width: self.width,
            height: self.height,
            len,
        })
    }

    /// Write the image as an 8-bit RGBA PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), OutputError> {
        let path = path.as_ref();
        self.to_rgba_image()?
            .save_with_format(path, ImageFormat::Png)?;

        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}
