//! Build configuration.

use crate::bits::{bits_in_range, bucket_count, DEFAULT_BITS};
use crate::error::{Error, Result};

/// Configuration for building a bucket table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Number of prefix bits `K`; the table has `2^K` buckets.
    pub bits: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self { bits: DEFAULT_BITS }
    }
}

impl Config {
    /// Configuration with the given bucket-bit count.
    pub const fn with_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Check that `bits` is within `[MIN_BITS, MAX_BITS]`.
    pub fn validate(&self) -> Result<()> {
        if bits_in_range(self.bits) {
            Ok(())
        } else {
            Err(Error::InvalidBits(self.bits))
        }
    }

    /// Length of the start table this configuration needs (`2^bits + 1`).
    pub fn table_len(&self) -> Result<usize> {
        self.validate()?;
        Ok(bucket_count(self.bits) + 1)
    }
}
