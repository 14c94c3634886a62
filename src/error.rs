//! Error types.

/// Errors raised while building or validating a bucket table.
///
/// Not finding a key is never an error; lookups return `Option<usize>`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The bucket-bit count is outside `[MIN_BITS, MAX_BITS]`.
    #[error("bucket bits must be in [{min}, {max}], got {0}", min = crate::MIN_BITS, max = crate::MAX_BITS)]
    InvalidBits(u32),

    /// The caller-supplied start table does not hold `2^bits + 1` entries.
    #[error("start table must hold {expected} entries, got {actual}")]
    TableLen {
        /// Required length, `2^bits + 1`.
        expected: usize,
        /// Length of the slice that was passed.
        actual: usize,
    },

    /// Keys handed to an owning constructor are not in non-decreasing order.
    #[error("keys are not sorted: element {index} is smaller than its predecessor")]
    Unsorted {
        /// Index of the first element smaller than the one before it.
        index: usize,
    },

    /// A table does not describe the key slice it was checked against.
    #[error("bucket table does not match the keys: {reason}")]
    Stale {
        /// What failed to match.
        reason: &'static str,
    },
}

/// Result type for table construction.
pub type Result<T> = std::result::Result<T, Error>;
