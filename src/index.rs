//! Owned bucket table that does not own its keys.

use std::mem::size_of;
use std::ops::Range;

use log::debug;

use crate::bits::{bits_in_range, bucket_count, prefix, width_of};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::table::{fill, find_with_width};

/// Bucket table for a sorted `u64` slice, built once and queried many times.
///
/// The index keeps the meaningful width computed at build time, so lookups
/// never recompute it. It does not hold the keys: every lookup takes the
/// slice the index was built from. Passing a slice of a different length
/// yields `None`; passing different contents of the same length yields
/// unspecified (but memory-safe) results.
///
/// The index is immutable between builds and can be shared across threads.
/// [`rebuild`](Self::rebuild) takes `&mut self`, so no lookup can observe a
/// half-built table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BucketIndex {
    bits: u32,
    width: u32,
    len: usize,
    starts: Vec<usize>,
}

/// Bucket occupancy statistics.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BucketStats {
    /// Number of buckets (`2^bits`).
    pub buckets: usize,
    /// Buckets holding no keys.
    pub empty_buckets: usize,
    /// Keys in the fullest bucket.
    pub max_bucket_len: usize,
    /// Mean keys per non-empty bucket.
    pub avg_bucket_len: f64,
    /// Bytes used by the start table.
    pub memory_bytes: usize,
}

impl BucketIndex {
    /// Build an index over `sorted` with `2^bits` buckets.
    pub fn new(sorted: &[u64], bits: u32) -> Result<Self> {
        Self::with_config(sorted, &Config::with_bits(bits))
    }

    /// Build an index over `sorted` using `config`.
    pub fn with_config(sorted: &[u64], config: &Config) -> Result<Self> {
        let mut index = Self {
            bits: config.bits,
            width: 0,
            len: 0,
            starts: vec![0; config.table_len()?],
        };
        index.fill(sorted);
        Ok(index)
    }

    /// Rebuild in place for new keys, reusing the table allocation.
    pub fn rebuild(&mut self, sorted: &[u64]) -> Result<()> {
        if !bits_in_range(self.bits) {
            return Err(Error::InvalidBits(self.bits));
        }
        self.starts.clear();
        self.starts.resize(bucket_count(self.bits) + 1, 0);
        self.fill(sorted);
        Ok(())
    }

    fn fill(&mut self, sorted: &[u64]) {
        self.width = width_of(sorted);
        self.len = sorted.len();
        let filled = fill(sorted, self.width, self.bits, &mut self.starts);
        debug!(
            "built bucket index: n={} bits={} width={} non_empty={}/{}",
            self.len,
            self.bits,
            self.width,
            filled,
            self.bucket_count()
        );
    }

    /// Index of an element of `sorted` equal to `x`, or `None`.
    ///
    /// With duplicates any matching index may be returned.
    #[inline]
    #[must_use]
    pub fn find(&self, sorted: &[u64], x: u64) -> Option<usize> {
        if self.len == 0 || sorted.len() != self.len || !self.usable() {
            return None;
        }
        find_with_width(sorted, self.width, self.bits, &self.starts, x)
    }

    // A deserialized index may carry any field values; keep shifts in range.
    #[inline]
    fn usable(&self) -> bool {
        bits_in_range(self.bits) && self.width <= u64::BITS
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, sorted: &[u64], x: u64) -> bool {
        self.find(sorted, x).is_some()
    }

    /// Bucket `x` maps to, or `None` when it falls past the table.
    #[inline]
    #[must_use]
    pub fn bucket_of(&self, x: u64) -> Option<usize> {
        if !self.usable() {
            return None;
        }
        let p = prefix(x, self.width, self.bits);
        (p < self.bucket_count() as u64).then_some(p as usize)
    }

    /// Index range of bucket `p` in the key slice.
    #[must_use]
    pub fn bucket_range(&self, p: usize) -> Option<Range<usize>> {
        match (self.starts.get(p), self.starts.get(p + 1)) {
            (Some(&lo), Some(&hi)) => Some(lo..hi),
            _ => None,
        }
    }

    /// Check that this index describes `sorted`.
    ///
    /// Intended for tables loaded from storage. Verifies length, width,
    /// table shape and that every key sits in the bucket its prefix selects.
    pub fn check(&self, sorted: &[u64]) -> Result<()> {
        if !bits_in_range(self.bits) {
            return Err(Error::InvalidBits(self.bits));
        }
        let buckets = bucket_count(self.bits);
        if self.width > u64::BITS {
            return Err(Error::Stale { reason: "maximum key width differs" });
        }
        if self.starts.len() != buckets + 1 {
            return Err(Error::TableLen {
                expected: buckets + 1,
                actual: self.starts.len(),
            });
        }
        if sorted.len() != self.len {
            return Err(Error::Stale { reason: "key count differs" });
        }
        if width_of(sorted) != self.width {
            return Err(Error::Stale { reason: "maximum key width differs" });
        }
        if self.starts[buckets] != self.len {
            return Err(Error::Stale { reason: "closing sentinel is not the key count" });
        }
        if self.starts[0] != 0 {
            return Err(Error::Stale { reason: "first bucket does not start at 0" });
        }
        if self.starts.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::Stale { reason: "bucket starts decrease" });
        }
        for p in 0..buckets {
            let (lo, hi) = (self.starts[p], self.starts[p + 1]);
            if sorted[lo..hi]
                .iter()
                .any(|&k| prefix(k, self.width, self.bits) != p as u64)
            {
                return Err(Error::Stale { reason: "key stored outside its bucket" });
            }
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Meaningful width of the keys the index was built from.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of keys the index was built from.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.starts.len().saturating_sub(1)
    }

    /// The start table, `2^bits + 1` entries.
    #[inline]
    #[must_use]
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// Memory usage of the table (excluding keys).
    #[inline]
    #[must_use]
    pub fn mem_usage(&self) -> usize {
        self.starts.len() * size_of::<usize>()
    }

    #[must_use]
    pub fn stats(&self) -> BucketStats {
        let mut empty_buckets = 0;
        let mut max_bucket_len = 0;
        for w in self.starts.windows(2) {
            let len = w[1].saturating_sub(w[0]);
            if len == 0 {
                empty_buckets += 1;
            }
            max_bucket_len = max_bucket_len.max(len);
        }
        let buckets = self.bucket_count();
        let non_empty = buckets - empty_buckets;
        BucketStats {
            buckets,
            empty_buckets,
            max_bucket_len,
            avg_bucket_len: if non_empty == 0 {
                0.0
            } else {
                self.len as f64 / non_empty as f64
            },
            memory_bytes: self.mem_usage(),
        }
    }
}
