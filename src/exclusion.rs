//! Mutual-exclusion filtering of unlocked contributors.
//!
//! A committed placement may declare candidates it cannot coexist with. In
//! every cell it owns, those candidates are struck from `incident` even
//! though they wrote evidence there. Owners themselves are never removed.
use crate::grid::HardEvidenceGrid;
use crate::types::{Candidate, CandidateId};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Stable-id keyed relation: `id -> ids that must not share a term with it`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnwantedNeighbors {
    map: HashMap<CandidateId, HashSet<CandidateId>>,
}

impl UnwantedNeighbors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `other` as unwanted next to `id` (one direction only).
    pub fn insert(&mut self, id: CandidateId, other: CandidateId) {
        self.map.entry(id).or_default().insert(other);
    }

    /// Record the pair in both directions.
    pub fn insert_symmetric(&mut self, a: CandidateId, b: CandidateId) {
        self.insert(a, b);
        self.insert(b, a);
    }

    /// Exclusion set of `id`; unknown ids have none.
    pub fn excluded_by(&self, id: CandidateId) -> Option<&HashSet<CandidateId>> {
        self.map.get(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }
}

impl FromIterator<(CandidateId, CandidateId)> for UnwantedNeighbors {
    fn from_iter<T: IntoIterator<Item = (CandidateId, CandidateId)>>(iter: T) -> Self {
        let mut relation = Self::new();
        for (id, other) in iter {
            relation.insert(id, other);
        }
        relation
    }
}

/// Counters reported by [`apply_exclusions`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionStats {
    /// Cells where at least one contributor was removed.
    pub cells_affected: usize,
    /// Removed (cell, candidate) entries.
    pub removed: usize,
}

/// Strip, per cell, every incident candidate excluded by one of the cell's owners.
pub fn apply_exclusions(
    grid: &mut HardEvidenceGrid,
    candidates: &[Candidate],
    unwanted: &UnwantedNeighbors,
) -> ExclusionStats {
    let mut stats = ExclusionStats::default();
    if unwanted.is_empty() {
        return stats;
    }
    for cell in grid.cells_mut() {
        let before = cell.incident.len();
        if before == 0 {
            continue;
        }
        for &owner in cell.owners.iter() {
            let Some(excluded) = unwanted.excluded_by(candidates[owner].id) else {
                continue;
            };
            cell.incident
                .retain(|b| !excluded.contains(&candidates[*b].id));
        }
        let removed = before - cell.incident.len();
        if removed > 0 {
            stats.cells_affected += 1;
            stats.removed += removed;
        }
    }
    debug!(
        "apply_exclusions cells_affected={} removed={}",
        stats.cells_affected, stats.removed
    );
    stats
}
