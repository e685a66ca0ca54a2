//! Block size validation and grid geometry.

use std::num::NonZeroU32;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::MosaicError;

/// Block side length used when the caller does not supply one.
pub const DEFAULT_BLOCK_SIZE: u32 = 24;

/// Side length, in pixels, of one square averaging block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BlockSize(NonZeroU32);

impl BlockSize {
    /// Creates a validated block size.
    ///
    /// # Errors
    /// Returns [`MosaicError::InvalidBlockSize`] when `value == 0`.
    pub fn new(value: u32) -> Result<Self, MosaicError> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or(MosaicError::InvalidBlockSize(value))
    }

    /// Returns the side length in pixels.
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for BlockSize {
    fn default() -> Self {
        Self(NonZeroU32::new(DEFAULT_BLOCK_SIZE).unwrap_or(NonZeroU32::MIN))
    }
}

impl TryFrom<u32> for BlockSize {
    type Error = MosaicError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BlockSize> for u32 {
    fn from(block_size: BlockSize) -> Self {
        block_size.get()
    }
}

/// Clipped pixel extent of one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockExtent {
    /// Column range, clipped to the image width.
    pub x: Range<u32>,
    /// Row range, clipped to the image height.
    pub y: Range<u32>,
}

impl BlockExtent {
    /// Number of pixels inside the clipped extent.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.x.end - self.x.start) * u64::from(self.y.end - self.y.start)
    }
}

/// Returns the block grid dimensions `(columns, rows)`.
///
/// Partial blocks at the right and bottom edges count as full grid cells.
pub fn block_grid(width: u32, height: u32, block_size: BlockSize) -> (u32, u32) {
    let side = block_size.get();
    (width.div_ceil(side), height.div_ceil(side))
}

/// Returns the clipped extent of block `(block_x, block_y)`, or `None` when
/// the block lies outside the grid.
pub fn block_extent(
    width: u32,
    height: u32,
    block_size: BlockSize,
    block_x: u32,
    block_y: u32,
) -> Option<BlockExtent> {
    let (columns, rows) = block_grid(width, height, block_size);
    if block_x >= columns || block_y >= rows {
        return None;
    }

    Some(BlockExtent {
        x: clipped_span(block_x, block_size.get(), width),
        y: clipped_span(block_y, block_size.get(), height),
    })
}

/// Span `[index * side, min(limit, (index + 1) * side))`.
///
/// Callers guarantee `index < limit.div_ceil(side)`, so the start never
/// exceeds `limit`.
pub(crate) fn clipped_span(index: u32, side: u32, limit: u32) -> Range<u32> {
    let start = index.saturating_mul(side).min(limit);
    let end = start.saturating_add(side).min(limit);
    start..end
}
