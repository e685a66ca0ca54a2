//! Transform configuration and its JSON codec.

use serde::{Deserialize, Serialize};

use crate::MosaicError;
use crate::block::BlockSize;

/// Policy for writing a non-integer channel average back into 8 bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Drop the fractional part (floor for non-negative averages).
    #[default]
    Truncate,
    /// Round to nearest, ties to even. Same result as storing the average
    /// into a clamped 8-bit canvas array.
    Nearest,
}

impl Rounding {
    /// Divides a channel sum by the block pixel count under this policy.
    ///
    /// `count` must be non-zero and `sum <= count * 255`.
    pub fn average(self, sum: u64, count: u64) -> u8 {
        let quotient = sum / count;
        let average = match self {
            Self::Truncate => quotient,
            Self::Nearest => {
                let twice_remainder = (sum % count) * 2;
                let round_up = twice_remainder > count
                    || (twice_remainder == count && quotient % 2 == 1);
                quotient + u64::from(round_up)
            }
        };
        u8::try_from(average).unwrap_or(u8::MAX)
    }
}

/// Parameters of one mosaic transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MosaicConfig {
    /// Side length of each averaging block.
    pub block_size: BlockSize,
    /// Write-back rounding policy.
    pub rounding: Rounding,
}

impl MosaicConfig {
    /// Returns a copy with a different block size.
    pub fn with_block_size(mut self, block_size: BlockSize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Returns a copy with a different rounding policy.
    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Serializes the configuration to compact JSON bytes.
    ///
    /// # Errors
    /// Returns [`MosaicError::Config`] when JSON serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, MosaicError> {
        serde_json::to_vec(self).map_err(MosaicError::Config)
    }

    /// Deserializes a configuration document. Missing fields take defaults.
    ///
    /// # Errors
    /// Returns [`MosaicError::Config`] on malformed JSON, unknown fields, or a
    /// zero block size.
    pub fn from_json_bytes(raw: &[u8]) -> Result<Self, MosaicError> {
        serde_json::from_slice(raw).map_err(MosaicError::Config)
    }
}
