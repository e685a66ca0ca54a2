#![warn(missing_docs)]
//! # mosaic-canvas-mosaic
//!
//! ## Purpose
//! Pixelates RGBA rasters by replacing every pixel of each square block with
//! the block's average color, alpha included.
//!
//! ## Responsibilities
//! - Validate block size and input geometry before any processing.
//! - Tile the image into blocks from the top-left corner, clipping the last
//!   column and row of blocks at the image edge.
//! - Average each block over the pixels that exist and scatter the result.
//!
//! ## Data flow
//! [`PixelBuffer`] + [`MosaicConfig`] -> [`mosaic_with_config`] -> new
//! [`PixelBuffer`] of identical geometry.
//!
//! ## Ownership and lifetimes
//! The source is only borrowed. The output is freshly allocated and owned by
//! the caller. Rows are processed in bands of `block_size` rows, each band an
//! exclusive slice of the output, so blocks never write overlapping bytes.
//! With the `parallel` feature the bands run on the rayon pool.
//!
//! ## Error model
//! Invalid geometry or block size fails with [`MosaicError`] before any output
//! is produced. The transform itself cannot fail.
//!
//! ## Example
//! ```rust
//! use mosaic_canvas_core::PixelBuffer;
//! use mosaic_canvas_mosaic::mosaic;
//!
//! let source = PixelBuffer::new(2, 1, vec![0, 0, 0, 255, 100, 50, 10, 255]).unwrap();
//! let output = mosaic(&source, Some(2)).unwrap();
//! assert_eq!(output.pixel(0, 0), Some([50, 25, 5, 255]));
//! assert_eq!(output.pixel(1, 0), Some([50, 25, 5, 255]));
//! ```

mod block;
mod config;

use mosaic_canvas_core::{CHANNELS, CoreError, PixelBuffer, required_rgba_len};
use thiserror::Error;
use tracing::debug;

pub use block::{BlockExtent, BlockSize, DEFAULT_BLOCK_SIZE, block_extent, block_grid};
pub use config::{MosaicConfig, Rounding};

/// Pixelates `source` with square blocks of `block_size` pixels.
///
/// `None` selects [`DEFAULT_BLOCK_SIZE`]. Averages are truncated toward zero.
///
/// # Errors
/// Returns [`MosaicError::InvalidBlockSize`] for `Some(0)`.
pub fn mosaic(source: &PixelBuffer, block_size: Option<u32>) -> Result<PixelBuffer, MosaicError> {
    let block_size = resolve_block_size(block_size)?;
    mosaic_with_config(source, &MosaicConfig::default().with_block_size(block_size))
}

/// Pixelates `source` using an explicit configuration.
///
/// # Errors
/// Returns [`MosaicError::InvalidInput`] only if the output geometry cannot be
/// represented, which a valid source rules out.
pub fn mosaic_with_config(
    source: &PixelBuffer,
    config: &MosaicConfig,
) -> Result<PixelBuffer, MosaicError> {
    let rgba = transform(source.as_rgba(), source.width(), source.height(), config);
    Ok(PixelBuffer::new(source.width(), source.height(), rgba)?)
}

/// Pixelates a raw RGBA slice of `width * height * 4` bytes.
///
/// # Errors
/// Returns [`MosaicError::InvalidInput`] when the slice length does not match
/// the geometry, and [`MosaicError::InvalidBlockSize`] for `Some(0)`.
pub fn mosaic_rgba(
    rgba: &[u8],
    width: u32,
    height: u32,
    block_size: Option<u32>,
) -> Result<Vec<u8>, MosaicError> {
    let expected = required_rgba_len(width, height)?;
    if rgba.len() != expected {
        let error = CoreError::ShapeMismatch {
            expected,
            actual: rgba.len(),
        };
        debug!(width, height, %error, "rejected mosaic input");
        return Err(error.into());
    }

    let block_size = resolve_block_size(block_size)?;
    let config = MosaicConfig::default().with_block_size(block_size);
    Ok(transform(rgba, width, height, &config))
}

fn resolve_block_size(block_size: Option<u32>) -> Result<BlockSize, MosaicError> {
    match block_size {
        None => Ok(BlockSize::default()),
        Some(value) => BlockSize::new(value).inspect_err(|error| {
            debug!(%error, "rejected mosaic block size");
        }),
    }
}

/// Runs the transform over a length-checked buffer.
fn transform(source: &[u8], width: u32, height: u32, config: &MosaicConfig) -> Vec<u8> {
    let mut output = vec![0_u8; source.len()];
    if output.is_empty() {
        return output;
    }

    let side = config.block_size.get();
    let stride = width as usize * CHANNELS;
    let band_len = stride.saturating_mul(side as usize);
    let band = |(band_index, rows): (usize, &mut [u8])| {
        mosaic_band(source, rows, band_index as u32, width, config);
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        output.par_chunks_mut(band_len).enumerate().for_each(band);
    }

    #[cfg(not(feature = "parallel"))]
    output.chunks_mut(band_len).enumerate().for_each(band);

    let (columns, rows) = block_grid(width, height, config.block_size);
    debug!(
        width,
        height,
        block_size = side,
        columns,
        rows,
        rounding = ?config.rounding,
        "mosaic transform complete"
    );

    output
}

/// Averages and scatters every block in one band of rows.
///
/// `band` is the output slice for block row `block_y`; it holds `block_size`
/// rows, or fewer for the clipped bottom band.
fn mosaic_band(source: &[u8], band: &mut [u8], block_y: u32, width: u32, config: &MosaicConfig) {
    let side = config.block_size.get();
    let stride = width as usize * CHANNELS;
    let band_rows = band.len() / stride;
    let first_row = block_y as usize * side as usize;

    for block_x in 0..width.div_ceil(side) {
        let span = block::clipped_span(block_x, side, width);
        let start = span.start as usize * CHANNELS;
        let end = span.end as usize * CHANNELS;

        let mut sums = [0_u64; CHANNELS];
        for row in 0..band_rows {
            let offset = (first_row + row) * stride;
            for pixel in source[offset + start..offset + end].chunks_exact(CHANNELS) {
                for (sum, &value) in sums.iter_mut().zip(pixel) {
                    *sum += u64::from(value);
                }
            }
        }

        // Only pixels inside the image are counted, never padding.
        let count = (band_rows * span.len()) as u64;
        let average = sums.map(|sum| config.rounding.average(sum, count));

        for row in 0..band_rows {
            let offset = row * stride;
            for pixel in band[offset + start..offset + end].chunks_exact_mut(CHANNELS) {
                pixel.copy_from_slice(&average);
            }
        }
    }
}

/// Error type for the mosaic transform.
#[derive(Debug, Error)]
pub enum MosaicError {
    /// Source buffer does not match its declared geometry.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] CoreError),
    /// Block size was explicitly supplied as zero.
    #[error("block size must be a positive integer, got {0}")]
    InvalidBlockSize(u32),
    /// Configuration document could not be encoded or decoded.
    #[error("mosaic config codec failure: {0}")]
    Config(serde_json::Error),
}
