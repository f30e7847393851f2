use super::table::SoftTermTable;
use crate::grid::SoftEvidenceGrid;
use log::debug;
use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftAggregationStats {
    pub contributing_cells: usize,
    pub keys_inserted: usize,
    pub keys_merged: usize,
}

/// Sum each cell's soft weight vector under its incident key. Raw sums: no
/// averaging and no pruning.
pub fn aggregate_soft_terms(grid: &SoftEvidenceGrid) -> (SoftTermTable, SoftAggregationStats) {
    let mut table = SoftTermTable::new();
    let mut stats = SoftAggregationStats::default();
    for cell in grid.cells() {
        if cell.incident.is_empty() {
            continue;
        }
        stats.contributing_cells += 1;
        if table.accumulate(&cell.incident, &cell.weights) {
            stats.keys_inserted += 1;
        } else {
            stats.keys_merged += 1;
        }
    }
    debug!(
        "aggregate_soft_terms cells={} inserted={} merged={}",
        stats.contributing_cells, stats.keys_inserted, stats.keys_merged
    );
    (table, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SoftCell;

    fn soft_cell(entries: &[(usize, f64)]) -> SoftCell {
        let mut cell = SoftCell::default();
        for &(a, w) in entries {
            cell.push(a, w);
        }
        cell
    }

    #[test]
    fn sums_vectors_per_key() {
        let mut grid = SoftEvidenceGrid::new(4, 1);
        let cells = grid.cells_mut();
        cells[0] = soft_cell(&[(0, 0.25), (1, 0.5)]);
        cells[1] = soft_cell(&[(0, 0.5), (1, 0.25)]);
        cells[2] = soft_cell(&[(1, 1.0)]);
        let (table, stats) = aggregate_soft_terms(&grid);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&[0, 1]).unwrap().as_slice(), &[0.75, 0.75]);
        assert_eq!(table.get(&[1]).unwrap().as_slice(), &[1.0]);
        assert_eq!(stats.contributing_cells, 3);
        assert_eq!(stats.keys_merged, 1);
    }
}
