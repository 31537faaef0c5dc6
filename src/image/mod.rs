//! Raster input: decoding photos and exposing them to the sampler.

mod synth;

use std::path::Path;

use image::{DynamicImage, GenericImageView, GrayImage, RgbImage};

use crate::core::error::ScanError;
use crate::core::sampler::PixelSource;

pub use synth::{SynthOptions, render_synthetic_card};

/// Decode an image file into an RGB buffer.
pub fn load_rgb(path: &Path) -> Result<RgbImage, ScanError> {
    let decoded = image::open(path).map_err(|source| ScanError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "decoded {} ({}x{})",
        path.display(),
        decoded.width(),
        decoded.height()
    );
    Ok(decoded.to_rgb8())
}

impl PixelSource for RgbImage {
    fn size(&self) -> (u32, u32) {
        self.dimensions()
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.get_pixel(x, y).0
    }
}

impl PixelSource for GrayImage {
    fn size(&self) -> (u32, u32) {
        self.dimensions()
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let [v] = self.get_pixel(x, y).0;
        [v, v, v]
    }
}

impl PixelSource for DynamicImage {
    fn size(&self) -> (u32, u32) {
        self.dimensions()
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let [r, g, b, _] = self.get_pixel(x, y).0;
        [r, g, b]
    }
}
