//! Bit-width and prefix helpers.
//!
//! A key is mapped to its bucket by taking the top `bits` bits of the key
//! relative to the meaningful width `W` of the dataset, i.e. the width of the
//! largest key. Datasets narrower than `bits` are spread over the whole table
//! by shifting left instead of right.

/// Smallest supported bucket-bit count.
pub const MIN_BITS: u32 = 1;

/// Largest supported bucket-bit count. Bounds the table at `2^24 + 1` entries.
pub const MAX_BITS: u32 = 24;

/// Bucket-bit count used when none is given.
pub const DEFAULT_BITS: u32 = 16;

/// Number of bits needed to represent `x`, with `bit_width(0) == 1`.
#[inline]
#[must_use]
pub const fn bit_width(x: u64) -> u32 {
    if x == 0 {
        1
    } else {
        u64::BITS - x.leading_zeros()
    }
}

/// Meaningful width of a sorted key slice: the width of its last element.
#[inline]
#[must_use]
pub fn width_of(sorted: &[u64]) -> u32 {
    bit_width(sorted.last().copied().unwrap_or(0))
}

/// Bucket prefix of `x` for a dataset of width `width` and a table of `bits` bits.
///
/// Keys not wider than `width` always land in `[0, 2^bits)`. Wider keys either
/// land past the end of the table or, when `width < bits` and the shift drops
/// high bits, anywhere; callers compare against the stored keys before
/// reporting a hit.
///
/// Requires `width <= 64` and `bits <= MAX_BITS`; other values overflow the shift.
#[inline(always)]
#[must_use]
pub const fn prefix(x: u64, width: u32, bits: u32) -> u64 {
    debug_assert!(width <= u64::BITS && bits <= MAX_BITS, "prefix: width or bits out of range");
    if width >= bits {
        x >> (width - bits)
    } else {
        x << (bits - width)
    }
}

/// `2^bits`.
#[inline]
#[must_use]
pub const fn bucket_count(bits: u32) -> usize {
    1usize << bits
}

#[inline]
pub(crate) const fn bits_in_range(bits: u32) -> bool {
    bits >= MIN_BITS && bits <= MAX_BITS
}
