//! Sorted key set that owns both its keys and its bucket index.

use std::ops::Deref;

use log::trace;

use crate::bits::DEFAULT_BITS;
use crate::error::{Error, Result};
use crate::index::BucketIndex;

/// An immutable sorted set of `u64` keys with bucket-indexed lookup.
///
/// Duplicates are kept; [`find`](Self::find) returns the index of any one of
/// them.
///
/// ```rust
/// use bucket_search::BucketSet;
///
/// let set = BucketSet::from_sorted(vec![2, 4, 4, 7, 11, 20], 2).unwrap();
/// assert_eq!(set.find(7), Some(3));
/// assert_eq!(set.find(5), None);
/// assert!(set.contains(20));
/// ```
#[derive(Clone, Debug)]
pub struct BucketSet {
    keys: Vec<u64>,
    index: BucketIndex,
}

impl BucketSet {
    /// Build from keys that are already in non-decreasing order.
    pub fn from_sorted(keys: Vec<u64>, bits: u32) -> Result<Self> {
        if let Some(i) = keys.windows(2).position(|w| w[0] > w[1]) {
            return Err(Error::Unsorted { index: i + 1 });
        }
        trace!("bucket set from {} sorted keys", keys.len());
        let index = BucketIndex::new(&keys, bits)?;
        Ok(Self { keys, index })
    }

    /// Sort `keys` and build.
    pub fn from_unsorted(mut keys: Vec<u64>, bits: u32) -> Result<Self> {
        trace!("sorting {} keys", keys.len());
        keys.sort_unstable();
        let index = BucketIndex::new(&keys, bits)?;
        Ok(Self { keys, index })
    }

    /// Index of a key equal to `x`, or `None`.
    #[inline]
    #[must_use]
    pub fn find(&self, x: u64) -> Option<usize> {
        self.index.find(&self.keys, x)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, x: u64) -> bool {
        self.find(x).is_some()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, i: usize) -> Option<u64> {
        self.keys.get(i).copied()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u64] {
        &self.keys
    }

    #[inline]
    #[must_use]
    pub fn index(&self) -> &BucketIndex {
        &self.index
    }

    /// Give back the keys, dropping the index.
    #[must_use]
    pub fn into_inner(self) -> Vec<u64> {
        self.keys
    }
}

impl Deref for BucketSet {
    type Target = [u64];

    fn deref(&self) -> &[u64] {
        &self.keys
    }
}

impl FromIterator<u64> for BucketSet {
    /// Collects, sorts and indexes with [`DEFAULT_BITS`].
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut keys: Vec<u64> = iter.into_iter().collect();
        keys.sort_unstable();
        let index = match BucketIndex::new(&keys, DEFAULT_BITS) {
            Ok(index) => index,
            Err(e) => unreachable!("DEFAULT_BITS is always valid: {e}"),
        };
        Self { keys, index }
    }
}
