//! RGBA pixel rasters.
//!
//! A [`PixelRaster`] is built once per recompute and never mutated in place
//! afterwards; cropping and smoothing produce new rasters.

use image::{imageops, Rgba, RgbaImage};
use plot_common::{PlotError, PlotResult};

/// A 2-D buffer of straight-alpha RGBA8 pixels, row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelRaster {
    image: RgbaImage,
}

impl PixelRaster {
    /// Create a fully transparent raster.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Wrap an existing image buffer.
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Build a raster from packed RGBA bytes (4 per pixel, row-major).
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> PlotResult<Self> {
        let expected = width as usize * height as usize * 4;
        let actual = pixels.len();
        if actual != expected {
            return Err(PlotError::shape_mismatch(expected, actual));
        }
        RgbaImage::from_raw(width, height, pixels)
            .map(Self::from_image)
            .ok_or_else(|| PlotError::shape_mismatch(expected, actual))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// True if the raster has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Pixel at `x`, `y`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.image.get_pixel(x, y).0)
    }

    pub(crate) fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        self.image.put_pixel(x, y, Rgba(rgba));
    }

    /// Copy out the sub-rectangle starting at `x`, `y`.
    ///
    /// The rectangle is clamped to the raster bounds.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> PixelRaster {
        let x = x.min(self.width());
        let y = y.min(self.height());
        let width = width.min(self.width() - x);
        let height = height.min(self.height() - y);
        Self::from_image(imageops::crop_imm(&self.image, x, y, width, height).to_image())
    }

    /// Resample to exactly `width` x `height` with an interpolating filter.
    ///
    /// Zero-area input or output leaves the raster unchanged.
    pub fn scaled_smooth(&self, width: u32, height: u32) -> PixelRaster {
        if self.is_empty() || width == 0 || height == 0 {
            return self.clone();
        }
        if (width, height) == self.dimensions() {
            return self.clone();
        }
        Self::from_image(imageops::resize(
            &self.image,
            width,
            height,
            imageops::FilterType::Triangle,
        ))
    }

    /// Underlying image buffer.
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Packed RGBA bytes.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}
