//! # bucket-search
//!
//! Exact-match lookup over a sorted `u64` array in amortized constant time.
//!
//! A start table of `2^K + 1` offsets splits the array into buckets addressed
//! by the top `K` bits of a key, measured against the width of the largest
//! key. A lookup reads two table entries and binary-searches only the bucket
//! between them. Building the table is a single pass over the keys plus a
//! pass over the table.
//!
//! The structure is static: it must be rebuilt whenever the keys change.
//! Heavily skewed key distributions crowd many keys into few buckets; lookups
//! stay correct but degrade towards a binary search over the crowded bucket.
//!
//! ## Example
//!
//! ```rust
//! use bucket_search::BucketIndex;
//!
//! let keys = [2u64, 4, 4, 7, 11, 20];
//! let index = BucketIndex::new(&keys, 2).unwrap();
//!
//! assert_eq!(index.find(&keys, 7), Some(3));
//! assert_eq!(index.find(&keys, 20), Some(5));
//! assert_eq!(index.find(&keys, 5), None);
//! ```
//!
//! Callers that manage the table memory themselves use [`build_into`] and
//! [`find_in`]:
//!
//! ```rust
//! use bucket_search::{build_into, find_in};
//!
//! let keys = [10u64, 20, 30, 40];
//! let mut start = vec![0usize; (1 << 3) + 1];
//! build_into(&keys, 3, &mut start).unwrap();
//! assert_eq!(find_in(&keys, 3, &start, 30), Some(2));
//! ```

#![warn(clippy::all)]

pub mod bits;
pub mod config;
pub mod error;
pub mod index;
pub mod set;
pub mod table;

pub use bits::{bit_width, prefix, DEFAULT_BITS, MAX_BITS, MIN_BITS};
pub use config::Config;
pub use error::{Error, Result};
pub use index::{BucketIndex, BucketStats};
pub use set::BucketSet;
pub use table::{build_into, find_in, lower_bound};

#[cfg(test)]
mod proptests;
