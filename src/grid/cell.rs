use crate::builder::TermParams;
use crate::key::IndexList;
use crate::types::CandidateIndex;
use smallvec::SmallVec;

/// Shared view over the two cell kinds.
pub trait EvidenceCell: Default + Send + Sync {
    /// Contributors that end up in the subset key.
    fn incident(&self) -> &[CandidateIndex];

    fn is_empty(&self) -> bool;
}

/// Cell of the hard-ownership grid.
#[derive(Clone, Debug, PartialEq)]
pub struct HardCell {
    /// Unlocked contributors, in candidate order.
    pub incident: IndexList,
    /// Locked contributors, in candidate order.
    pub owners: IndexList,
    /// Sum of owner weights.
    pub weight: f64,
    /// Smallest normalised distance from a contributor's position to this cell.
    pub distance: f64,
}

impl Default for HardCell {
    fn default() -> Self {
        Self {
            incident: IndexList::new(),
            owners: IndexList::new(),
            weight: 0.0,
            distance: f64::INFINITY,
        }
    }
}

impl HardCell {
    #[inline]
    pub fn count(&self) -> usize {
        self.owners.len()
    }

    /// Owner-penalised, distance-scaled weight; `None` for owner-less cells.
    pub fn derived_weight(&self, params: &TermParams) -> Option<f64> {
        let count = self.count();
        (count > 0).then(|| params.owner_weight(self.weight, count, self.distance))
    }
}

impl EvidenceCell for HardCell {
    fn incident(&self) -> &[CandidateIndex] {
        &self.incident
    }

    fn is_empty(&self) -> bool {
        self.incident.is_empty() && self.owners.is_empty()
    }
}

/// Cell of the soft-assignment grid; `weights[k]` belongs to `incident[k]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SoftCell {
    pub incident: IndexList,
    pub weights: SmallVec<[f64; 4]>,
}

impl SoftCell {
    #[inline]
    pub(crate) fn push(&mut self, candidate: CandidateIndex, weight: f64) {
        self.incident.push(candidate);
        self.weights.push(weight);
    }
}

impl EvidenceCell for SoftCell {
    fn incident(&self) -> &[CandidateIndex] {
        &self.incident
    }

    fn is_empty(&self) -> bool {
        self.incident.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ownerless_cell_has_no_weight() {
        let mut cell = HardCell::default();
        cell.incident.push(3);
        assert_eq!(cell.derived_weight(&TermParams::default()), None);
        assert!(!cell.is_empty());
    }

    #[test]
    fn derived_weight_follows_owner_count_and_distance() {
        let params = TermParams::default();
        let mut cell = HardCell::default();
        cell.owners.push(0);
        cell.owners.push(1);
        cell.weight = 5.0;
        cell.distance = 0.5;
        let expected = 5.0 / 2f64.powf(1.5) * (3.0 - 0.5);
        assert_relative_eq!(cell.derived_weight(&params).unwrap(), expected);
        assert_eq!(cell.count(), 2);
    }
}
