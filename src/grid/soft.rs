use super::{clipped_columns, raster_row, EvidenceGrid, GridStats, SoftCell};
use crate::builder::TermParams;
use crate::error::TermError;
use crate::scan::{PlacementInputs, ScanRaster};
use log::debug;
use nalgebra::Vector2;

/// Unnormalised axis-aligned Gaussian: `exp(-Σ pos² / (2 σ²))`.
#[inline]
pub fn gaussian_weight(pos: &Vector2<f64>, sigma: &Vector2<f64>) -> f64 {
    let z = pos.component_div(sigma);
    (-0.5 * z.norm_squared()).exp()
}

struct SoftPlacement<'a> {
    scan: &'a ScanRaster,
    offset: (i64, i64),
    /// Sum of kernel weights over the candidate's in-bounds occupied cells.
    total: f64,
}

impl EvidenceGrid<SoftCell> {
    /// Soft-assignment accumulation: every occupied scan cell of a candidate
    /// receives `kernel / total * max_range`, where the kernel is centred on
    /// the raster origin and `total` normalises over the candidate's cells.
    /// No lock distinction, no density or floor-plan gate.
    pub fn accumulate(
        inputs: &PlacementInputs<'_>,
        params: &TermParams,
    ) -> Result<(Self, GridStats), TermError> {
        params.validate()?;
        let scans = inputs.resolve_scans()?;
        let (width, height) = (inputs.width(), inputs.height());
        let sigma = Vector2::from(params.kernel_sigma);
        let scale = params.scale;

        let placements: Vec<SoftPlacement<'_>> = inputs
            .candidates
            .iter()
            .zip(&scans)
            .map(|(candidate, &scan)| {
                let offset = scan.offset_for(candidate);
                let total = kernel_total(scan, offset, width, height, scale, &sigma);
                SoftPlacement {
                    scan,
                    offset,
                    total,
                }
            })
            .collect();

        let max_range = params.max_range;
        let mut grid = Self::new(width, height);
        let writes = grid.fill_rows(|y, row| {
            let mut writes = 0usize;
            for (a, p) in placements.iter().enumerate() {
                if p.total <= 0.0 {
                    continue;
                }
                let mask = &p.scan.mask;
                let Some(j) = raster_row(y, p.offset.1, mask.h) else {
                    continue;
                };
                for i in clipped_columns(mask.w, p.offset.0, row.len()) {
                    if !mask.get(i, j) {
                        continue;
                    }
                    let pos = kernel_position(p.scan, i, j, scale);
                    let x = (i as i64 + p.offset.0) as usize;
                    row[x].push(a, gaussian_weight(&pos, &sigma) / p.total * max_range);
                    writes += 1;
                }
            }
            writes
        });

        let stats = grid.stats(inputs.candidates.len(), writes);
        debug!(
            "SoftEvidenceGrid::accumulate {}x{} candidates={} writes={} touched={}",
            stats.width, stats.height, stats.candidates, stats.writes, stats.cells_touched
        );
        Ok((grid, stats))
    }
}

#[inline]
fn kernel_position(scan: &ScanRaster, i: usize, j: usize, scale: f64) -> Vector2<f64> {
    Vector2::new(
        (i as i64 - scan.zero_zero.x as i64) as f64,
        (j as i64 - scan.zero_zero.y as i64) as f64,
    ) / scale
}

fn kernel_total(
    scan: &ScanRaster,
    offset: (i64, i64),
    width: usize,
    height: usize,
    scale: f64,
    sigma: &Vector2<f64>,
) -> f64 {
    let mask = &scan.mask;
    let mut total = 0.0;
    for y in 0..height {
        let Some(j) = raster_row(y, offset.1, mask.h) else {
            continue;
        };
        for i in clipped_columns(mask.w, offset.0, width) {
            if mask.get(i, j) {
                total += gaussian_weight(&kernel_position(scan, i, j, scale), sigma);
            }
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SoftEvidenceGrid;
    use crate::raster::{Mask, RasterU8};
    use crate::scan::ScanSet;
    use crate::types::Candidate;
    use approx::assert_relative_eq;

    #[test]
    fn gaussian_is_one_at_origin_and_decays() {
        let sigma = Vector2::new(5.0, 5.0);
        assert_relative_eq!(gaussian_weight(&Vector2::zeros(), &sigma), 1.0);
        let one_sigma = gaussian_weight(&Vector2::new(5.0, 0.0), &sigma);
        assert_relative_eq!(one_sigma, (-0.5f64).exp());
        let diag = gaussian_weight(&Vector2::new(5.0, 5.0), &sigma);
        assert_relative_eq!(diag, (-1.0f64).exp());
    }

    #[test]
    fn single_cell_candidate_gets_max_range() {
        let scans = ScanSet::new(vec![vec![ScanRaster::new(
            Mask::from_fn(3, 3, |x, y| x == 2 && y == 1),
            Vector2::new(1, 1),
        )]]);
        let plan = vec![0u8; 16];
        let candidates = vec![Candidate::unlocked(1, 1, 1, 0, 0)];
        let inputs = PlacementInputs::new(&candidates, &scans, RasterU8::new(4, 4, &plan));
        let params = TermParams::default();
        let (grid, stats) = SoftEvidenceGrid::accumulate(&inputs, &params).unwrap();
        assert_eq!(stats.writes, 1);
        let cell = grid.get(2, 1);
        assert_eq!(cell.incident.as_slice(), &[0]);
        assert_eq!(cell.weights.as_slice(), &[params.max_range]);
    }

    #[test]
    fn weights_of_a_candidate_sum_to_max_range() {
        let scans = ScanSet::new(vec![vec![ScanRaster::new(
            Mask::from_fn(5, 5, |x, y| (x + y) % 2 == 0),
            Vector2::new(2, 2),
        )]]);
        let plan = vec![0u8; 100];
        let candidates = vec![
            Candidate::unlocked(1, 3, 3, 0, 0),
            Candidate::unlocked(2, 4, 3, 0, 0),
        ];
        let inputs = PlacementInputs::new(&candidates, &scans, RasterU8::new(10, 10, &plan));
        let params = TermParams::default().with_scale(0.5);
        let (grid, _) = SoftEvidenceGrid::accumulate(&inputs, &params).unwrap();

        let mut sums = [0.0f64; 2];
        for cell in grid.cells() {
            assert_eq!(cell.incident.len(), cell.weights.len());
            for (&a, &w) in cell.incident.iter().zip(cell.weights.iter()) {
                sums[a] += w;
            }
        }
        assert_relative_eq!(sums[0], params.max_range, epsilon = 1e-12);
        assert_relative_eq!(sums[1], params.max_range, epsilon = 1e-12);
        // Centre of the first candidate carries the largest share.
        let centre = grid.get(3, 3);
        assert_eq!(centre.incident[0], 0);
        assert!(grid
            .cells()
            .iter()
            .flat_map(|c| c.incident.iter().zip(c.weights.iter()))
            .filter(|(a, _)| **a == 0)
            .all(|(_, &w)| w <= centre.weights[0]));
    }

    #[test]
    fn normalisation_ignores_cells_outside_the_plan() {
        let scans = ScanSet::new(vec![vec![ScanRaster::new(
            Mask::from_fn(3, 1, |_, _| true),
            Vector2::new(0, 0),
        )]]);
        let plan = vec![0u8; 2];
        let candidates = vec![Candidate::unlocked(1, 0, 0, 0, 0)];
        let inputs = PlacementInputs::new(&candidates, &scans, RasterU8::new(2, 1, &plan));
        let params = TermParams::default();
        let (grid, _) = SoftEvidenceGrid::accumulate(&inputs, &params).unwrap();
        let total: f64 = grid.cells().iter().flat_map(|c| c.weights.iter()).sum();
        assert_relative_eq!(total, params.max_range, epsilon = 1e-12);
    }
}
