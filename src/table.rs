//! Slice-level build and lookup over a caller-owned start table.
//!
//! The start table holds `2^bits + 1` offsets into the sorted key slice.
//! Bucket `p` covers `keys[start[p]..start[p + 1]]`; empty buckets have
//! `start[p] == start[p + 1]` and `start[2^bits] == keys.len()`.
//!
//! These functions trust the caller to pass the same keys and bit count to
//! [`find_in`] that were passed to [`build_into`]. A mismatch gives wrong
//! answers but never panics or reads out of bounds.

use log::debug;

use crate::bits::{bits_in_range, bucket_count, prefix, width_of};
use crate::error::{Error, Result};

/// Fill `start` with the bucket table for `keys`.
///
/// `keys` must be sorted in non-decreasing order and `start` must hold
/// exactly `2^bits + 1` entries. Runs in `O(keys.len() + 2^bits)` and does
/// not allocate.
pub fn build_into(keys: &[u64], bits: u32, start: &mut [usize]) -> Result<()> {
    if !bits_in_range(bits) {
        return Err(Error::InvalidBits(bits));
    }
    let buckets = bucket_count(bits);
    if start.len() != buckets + 1 {
        return Err(Error::TableLen {
            expected: buckets + 1,
            actual: start.len(),
        });
    }

    let width = width_of(keys);
    let filled = fill(keys, width, bits, start);
    debug!(
        "built bucket table: n={} bits={} width={} non_empty={}/{}",
        keys.len(),
        bits,
        width,
        filled,
        buckets
    );
    Ok(())
}

/// Two-pass fill. Returns the number of non-empty buckets.
///
/// `start.len()` must be `2^bits + 1`.
pub(crate) fn fill(keys: &[u64], width: u32, bits: u32, start: &mut [usize]) -> usize {
    let n = keys.len();
    let buckets = start.len() - 1;
    start.fill(n);

    // First occurrence per bucket.
    for (i, &key) in keys.iter().enumerate() {
        let p = prefix(key, width, bits) as usize;
        // Unsorted input can put a smaller key after the maximum; skip anything off the table.
        if let Some(slot) = start[..buckets].get_mut(p) {
            if *slot == n {
                *slot = i;
            }
        }
    }
    start[buckets] = n;

    // Empty buckets inherit the start of the next non-empty one.
    let mut filled = 0;
    let mut last = n;
    for slot in start[..buckets].iter_mut().rev() {
        if *slot == n {
            *slot = last;
        } else {
            last = *slot;
            filled += 1;
        }
    }
    filled
}

/// Index of an element equal to `x`, or `None`.
///
/// With duplicates any matching index may be returned.
#[inline]
#[must_use]
pub fn find_in(keys: &[u64], bits: u32, start: &[usize], x: u64) -> Option<usize> {
    if keys.is_empty() || !bits_in_range(bits) {
        return None;
    }
    find_with_width(keys, width_of(keys), bits, start, x)
}

/// Lookup with a precomputed width.
#[inline]
pub(crate) fn find_with_width(
    keys: &[u64],
    width: u32,
    bits: u32,
    start: &[usize],
    x: u64,
) -> Option<usize> {
    let p = prefix(x, width, bits);
    if p >= bucket_count(bits) as u64 {
        return None;
    }
    let p = p as usize;
    let (lo, hi) = match (start.get(p), start.get(p + 1)) {
        (Some(&lo), Some(&hi)) => (lo, hi.min(keys.len())),
        _ => return None,
    };
    if lo >= hi {
        return None;
    }

    if x < keys[lo] || x > keys[hi - 1] {
        return None;
    }

    let i = lower_bound(keys, lo, hi, x);
    (i < hi && keys[i] == x).then_some(i)
}

/// First index in `[lo, hi)` whose key is not less than `x`, or `hi`.
///
/// Requires `lo <= hi <= keys.len()`.
#[inline]
#[must_use]
pub fn lower_bound(keys: &[u64], mut lo: usize, mut hi: usize, x: u64) -> usize {
    while lo < hi {
        let mid = lo + ((hi - lo) >> 1);
        if keys[mid] < x {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}
