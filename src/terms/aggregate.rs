use super::table::HighOrderTable;
use crate::builder::TermParams;
use crate::grid::HardEvidenceGrid;
use log::debug;
use serde::Serialize;

/// Counters reported by [`aggregate_terms`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationStats {
    /// Cells with owners and a non-empty incident list.
    pub contributing_cells: usize,
    /// Owned cells whose incident list was empty (after exclusions).
    pub empty_incident_skipped: usize,
    pub keys_inserted: usize,
    pub keys_merged: usize,
    /// Averaged entries dropped as negligible.
    pub pruned: usize,
    pub retained: usize,
}

/// Fold the (exclusion-filtered) grid into a subset-keyed table.
///
/// Each cell with owners and incident contributors adds its derived weight
/// (see [`TermParams::owner_weight`]) under its incident list. Entries are
/// then averaged over their contributing cells and those with
/// `|w| <= prune_epsilon` (or an empty key) are dropped.
pub fn aggregate_terms(
    grid: &HardEvidenceGrid,
    params: &TermParams,
) -> (HighOrderTable, AggregationStats) {
    let mut table = HighOrderTable::new();
    let mut stats = AggregationStats::default();

    for cell in grid.cells() {
        let Some(weight) = cell.derived_weight(params) else {
            continue;
        };
        if cell.incident.is_empty() {
            stats.empty_incident_skipped += 1;
            continue;
        }
        stats.contributing_cells += 1;
        if table.accumulate(&cell.incident, weight) {
            stats.keys_inserted += 1;
        } else {
            stats.keys_merged += 1;
        }
    }

    for entry in table.entries_mut() {
        entry.w /= entry.c as f64;
    }
    let eps = params.prune_epsilon;
    stats.pruned = table.retain(|key, entry| !key.is_empty() && entry.w.abs() > eps);
    stats.retained = table.len();

    debug!(
        "aggregate_terms cells={} inserted={} merged={} pruned={} retained={}",
        stats.contributing_cells, stats.keys_inserted, stats.keys_merged, stats.pruned, stats.retained
    );
    (table, stats)
}
