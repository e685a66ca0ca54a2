#![warn(missing_docs)]
//! # mosaic-canvas-core
//!
//! ## Purpose
//! Defines the pixel data model shared across the `mosaic-canvas` workspace.
//!
//! ## Responsibilities
//! - Represent RGBA rasters as validated, owned pixel buffers.
//! - Compute required buffer lengths with overflow-checked arithmetic.
//! - Convert to and from `image::RgbaImage` when the `image` feature is on.
//!
//! ## Data flow
//! Callers decode an image elsewhere, wrap the bytes in [`PixelBuffer`], pass
//! it to the mosaic transform, and receive a new [`PixelBuffer`] back.
//!
//! ## Ownership and lifetimes
//! Buffers own their backing `Vec<u8>`. Transforms borrow the source and
//! allocate a fresh output, so input and output storage never alias.
//!
//! ## Error model
//! Shape validation failures return [`CoreError`] variants.
//!
//! ## Example
//! ```rust
//! use mosaic_canvas_core::PixelBuffer;
//!
//! let buffer = PixelBuffer::new(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
//! assert_eq!(buffer.pixel(1, 0), Some([0, 0, 255, 255]));
//! assert!(PixelBuffer::new(2, 2, vec![0; 4]).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of interleaved channels per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Row-major RGBA raster with 8 bits per channel.
///
/// Pixel `(x, y)` occupies bytes `(y * width + x) * 4 .. + 4`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedPixelBuffer")]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

#[derive(Deserialize)]
struct UncheckedPixelBuffer {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl TryFrom<UncheckedPixelBuffer> for PixelBuffer {
    type Error = CoreError;

    fn try_from(raw: UncheckedPixelBuffer) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height, raw.rgba)
    }
}

impl PixelBuffer {
    /// Constructs a validated pixel buffer.
    ///
    /// A zero width or height is accepted and yields an empty buffer.
    ///
    /// # Errors
    /// Returns [`CoreError::ShapeMismatch`] when the byte length is not exactly
    /// `width * height * 4`.
    /// Returns [`CoreError::DimensionOverflow`] when that product overflows.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, CoreError> {
        let expected_len = required_rgba_len(width, height)?;
        if rgba.len() != expected_len {
            return Err(CoreError::ShapeMismatch {
                expected: expected_len,
                actual: rgba.len(),
            });
        }

        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Allocates a fully transparent black buffer of the given geometry.
    ///
    /// # Errors
    /// Returns [`CoreError::DimensionOverflow`] when the byte length overflows.
    pub fn blank(width: u32, height: u32) -> Result<Self, CoreError> {
        let len = required_rgba_len(width, height)?;
        Ok(Self {
            width,
            height,
            rgba: vec![0; len],
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    pub fn pixel_count(&self) -> usize {
        self.rgba.len() / CHANNELS
    }

    /// Returns `true` when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.rgba.is_empty()
    }

    /// Borrows the raw RGBA bytes.
    pub fn as_rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Mutably borrows the raw RGBA bytes. The length cannot change.
    pub fn as_rgba_mut(&mut self) -> &mut [u8] {
        &mut self.rgba
    }

    /// Consumes the buffer and returns its bytes.
    pub fn into_rgba(self) -> Vec<u8> {
        self.rgba
    }

    /// Returns the RGBA value at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; CHANNELS]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let offset = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let mut value = [0; CHANNELS];
        value.copy_from_slice(&self.rgba[offset..offset + CHANNELS]);
        Some(value)
    }
}

#[cfg(feature = "image")]
impl TryFrom<image::RgbaImage> for PixelBuffer {
    type Error = CoreError;

    fn try_from(image: image::RgbaImage) -> Result<Self, Self::Error> {
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw())
    }
}

#[cfg(feature = "image")]
impl From<PixelBuffer> for image::RgbaImage {
    fn from(buffer: PixelBuffer) -> Self {
        let (width, height) = (buffer.width, buffer.height);
        // Invariant: `PixelBuffer` length always equals `width * height * 4`.
        image::ImageBuffer::from_raw(width, height, buffer.rgba)
            .unwrap_or_else(|| image::ImageBuffer::new(width, height))
    }
}

/// Error type for pixel buffer validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Buffer length does not match the declared geometry.
    #[error("invalid pixel buffer shape: expected {expected} bytes, got {actual}")]
    ShapeMismatch {
        /// Expected RGBA byte count.
        expected: usize,
        /// Actual RGBA byte count.
        actual: usize,
    },
    /// `width * height * 4` does not fit in `usize`.
    #[error("pixel buffer dimensions overflow")]
    DimensionOverflow,
}

/// Computes the byte length of an RGBA raster of the given geometry.
///
/// # Errors
/// Returns [`CoreError::DimensionOverflow`] when the product overflows `usize`.
pub fn required_rgba_len(width: u32, height: u32) -> Result<usize, CoreError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(CHANNELS))
        .ok_or(CoreError::DimensionOverflow)
}
