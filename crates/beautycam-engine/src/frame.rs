//! Borrowed views over per-frame pixel data.
//!
//! The host delivers one decoded frame per analysis cycle. `FrameBuffer`
//! borrows that data for the duration of the cycle; nothing is copied or
//! retained. Brightness is the unweighted mean of the color channels, the
//! quantity every downstream statistic is defined against.

use crate::error::{EngineError, EngineResult};
use image::RgbaImage;

/// Pixel layout of a delivered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// RGB packed, 3 bytes per pixel
    Rgb24,
    /// RGBA packed, 4 bytes per pixel; alpha is ignored
    Rgba32,
}

impl PixelFormat {
    /// Bytes per pixel for this format.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Rgb24 => 3,
            PixelFormat::Rgba32 => 4,
        }
    }

    /// Number of color channels contributing to brightness.
    pub fn color_channels(&self) -> usize {
        3
    }
}

/// Immutable view into one frame's pixel data.
#[derive(Debug, Clone, Copy)]
pub struct FrameBuffer<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl<'a> FrameBuffer<'a> {
    /// Create a view over packed pixel data.
    ///
    /// Fails when the dimensions are zero or the buffer length does not
    /// match `width * height * bytes_per_pixel`.
    pub fn new(data: &'a [u8], width: u32, height: u32, format: PixelFormat) -> EngineResult<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if data.len() != expected {
            return Err(EngineError::buffer_mismatch(expected, data.len()));
        }
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    /// View over a decoded `image` crate RGBA buffer.
    pub fn from_image(image: &'a RgbaImage) -> Self {
        // RgbaImage guarantees a tightly packed buffer of the right length.
        Self {
            data: image.as_raw(),
            width: image.width(),
            height: image.height(),
            format: PixelFormat::Rgba32,
        }
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel layout.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Brightness at `(x, y)` as the unweighted mean of the color channels,
    /// in `[0, 255]`. Out-of-bounds coordinates return `None`.
    #[inline]
    pub fn brightness(&self, x: u32, y: u32) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let offset = (y as usize * self.width as usize + x as usize) * bpp;
        let px = &self.data[offset..offset + self.format.color_channels()];
        Some((px[0] as f64 + px[1] as f64 + px[2] as f64) / 3.0)
    }
}
