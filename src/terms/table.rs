use crate::key::SubsetKey;
use nalgebra::DVector;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Aggregated weight of one subset key and the number of cells that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TermEntry {
    pub w: f64,
    pub c: usize,
}

impl TermEntry {
    pub fn new(w: f64) -> Self {
        Self { w, c: 1 }
    }
}

/// Subset key -> scalar term, consumed by the placement optimizer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HighOrderTable {
    entries: BTreeMap<SubsetKey, TermEntry>,
}

impl HighOrderTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert-or-update: add `w` to the running sum and bump the count.
    /// Returns `true` when the key was new.
    pub fn accumulate(&mut self, key: &[usize], w: f64) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.w += w;
                entry.c += 1;
                false
            }
            None => {
                self.entries
                    .insert(SubsetKey::from_slice(key), TermEntry::new(w));
                true
            }
        }
    }

    pub fn get(&self, key: &[usize]) -> Option<&TermEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SubsetKey, &TermEntry)> + Clone {
        self.entries.iter()
    }

    pub fn weights(&self) -> impl Iterator<Item = f64> + Clone + '_ {
        self.entries.values().map(|e| e.w)
    }

    pub(crate) fn entries_mut(&mut self) -> impl Iterator<Item = &mut TermEntry> {
        self.entries.values_mut()
    }

    /// Keep only entries for which `keep` returns true; returns the drop count.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&SubsetKey, &TermEntry) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|k, e| keep(k, e));
        before - self.entries.len()
    }
}

impl FromIterator<(SubsetKey, TermEntry)> for HighOrderTable {
    fn from_iter<T: IntoIterator<Item = (SubsetKey, TermEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[derive(Serialize)]
struct TermRecord<'a> {
    key: &'a SubsetKey,
    w: f64,
    c: usize,
}

impl Serialize for HighOrderTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            seq.serialize_element(&TermRecord {
                key,
                w: entry.w,
                c: entry.c,
            })?;
        }
        seq.end()
    }
}

/// Subset key -> summed per-candidate soft weights (`weights[k]` belongs to `key[k]`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SoftTermTable {
    entries: BTreeMap<SubsetKey, DVector<f64>>,
}

impl SoftTermTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Element-wise add `weights` into the key's vector, inserting if absent.
    /// Returns `true` when the key was new.
    pub fn accumulate(&mut self, key: &[usize], weights: &[f64]) -> bool {
        debug_assert_eq!(key.len(), weights.len());
        match self.entries.get_mut(key) {
            Some(sum) => {
                for (dst, &w) in sum.iter_mut().zip(weights) {
                    *dst += w;
                }
                false
            }
            None => {
                self.entries.insert(
                    SubsetKey::from_slice(key),
                    DVector::from_column_slice(weights),
                );
                true
            }
        }
    }

    pub fn get(&self, key: &[usize]) -> Option<&DVector<f64>> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SubsetKey, &DVector<f64>)> {
        self.entries.iter()
    }
}

#[derive(Serialize)]
struct SoftRecord<'a> {
    key: &'a SubsetKey,
    weights: &'a [f64],
}

impl Serialize for SoftTermTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for (key, weights) in &self.entries {
            seq.serialize_element(&SoftRecord {
                key,
                weights: weights.as_slice(),
            })?;
        }
        seq.end()
    }
}
