//! Ordered candidate-subset key used by the term tables.
//!
//! A key is the `incident` list of a grid cell taken verbatim. Accumulation
//! walks candidates in input order, so the same subset always produces the
//! same sequence within one run. Equality, hashing and ordering are
//! sequence-based: `[1, 2]` and `[2, 1]` are distinct keys. Downstream
//! consumers index terms this way, so the key is never sorted.
use crate::types::CandidateIndex;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Inline capacity for per-cell index lists; most cells see only a few candidates.
pub const INLINE_INDICES: usize = 4;

pub type IndexList = SmallVec<[CandidateIndex; INLINE_INDICES]>;

#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubsetKey(IndexList);

impl SubsetKey {
    pub fn new(indices: IndexList) -> Self {
        Self(indices)
    }

    pub fn from_slice(indices: &[CandidateIndex]) -> Self {
        Self(IndexList::from_slice(indices))
    }

    pub fn as_slice(&self) -> &[CandidateIndex] {
        &self.0
    }
}

impl Deref for SubsetKey {
    type Target = [CandidateIndex];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Ord and Hash of `SmallVec` match those of the slice, so lookups can borrow.
impl Borrow<[CandidateIndex]> for SubsetKey {
    fn borrow(&self) -> &[CandidateIndex] {
        &self.0
    }
}

impl From<Vec<CandidateIndex>> for SubsetKey {
    fn from(v: Vec<CandidateIndex>) -> Self {
        Self(IndexList::from_vec(v))
    }
}

impl fmt::Display for SubsetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for idx in self.0.iter() {
            if !first {
                f.write_str("_")?;
            }
            write!(f, "{idx}")?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for SubsetKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}
