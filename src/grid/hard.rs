use super::{clipped_columns, raster_row, EvidenceGrid, GridStats, HardCell};
use crate::builder::TermParams;
use crate::error::TermError;
use crate::raster::{Mask, RasterView, FLOOR_PLAN_EMPTY};
use crate::scan::{PlacementInputs, ScanRaster};
use crate::types::Candidate;
use log::debug;
use nalgebra::Vector2;
use std::collections::HashMap;

/// Per-candidate data resolved once before the row sweep.
struct HardPlacement<'a> {
    candidate: &'a Candidate,
    gate: &'a Mask,
    offset: (i64, i64),
    center: Vector2<f64>,
}

impl EvidenceGrid<HardCell> {
    /// Scatter every candidate's gated scan cells into a fresh grid.
    ///
    /// Locked candidates append themselves to `owners` and add their weight;
    /// unlocked ones append to `incident`. Every write lowers the cell
    /// distance to the candidate position (divided by `params.scale`).
    /// Cells outside the floor plan, or where the floor plan is empty, are
    /// skipped.
    pub fn accumulate(
        inputs: &PlacementInputs<'_>,
        params: &TermParams,
    ) -> Result<(Self, GridStats), TermError> {
        params.validate()?;
        let scans = inputs.resolve_scans()?;
        let gates = density_gates(inputs.candidates, &scans, params);
        let placements: Vec<HardPlacement<'_>> = inputs
            .candidates
            .iter()
            .zip(&scans)
            .map(|(candidate, scan)| HardPlacement {
                candidate,
                gate: &gates[&(candidate.color, candidate.rotation)],
                offset: scan.offset_for(candidate),
                center: candidate.center(),
            })
            .collect();

        let floor_plan = inputs.floor_plan;
        let scale = params.scale;
        let mut grid = Self::new(inputs.width(), inputs.height());
        let writes = grid.fill_rows(|y, row| {
            let plan_row = floor_plan.row(y);
            let mut writes = 0usize;
            for (a, p) in placements.iter().enumerate() {
                let Some(j) = raster_row(y, p.offset.1, p.gate.h) else {
                    continue;
                };
                let gate_row = p.gate.row(j);
                for i in clipped_columns(p.gate.w, p.offset.0, row.len()) {
                    if !gate_row[i] {
                        continue;
                    }
                    let x = (i as i64 + p.offset.0) as usize;
                    if plan_row[x] == FLOOR_PLAN_EMPTY {
                        continue;
                    }
                    let cell = &mut row[x];
                    if p.candidate.locked {
                        cell.weight += p.candidate.w;
                        cell.owners.push(a);
                    } else {
                        cell.incident.push(a);
                    }
                    let ray = Vector2::new(x as f64, y as f64) - p.center;
                    cell.distance = cell.distance.min(ray.norm() / scale);
                    writes += 1;
                }
            }
            writes
        });

        let stats = grid.stats(inputs.candidates.len(), writes);
        debug!(
            "HardEvidenceGrid::accumulate {}x{} candidates={} writes={} touched={}",
            stats.width, stats.height, stats.candidates, stats.writes, stats.cells_touched
        );
        Ok((grid, stats))
    }

    /// Cells holding at least one owner.
    pub fn owned_cells(&self) -> usize {
        self.cells().iter().filter(|c| c.count() > 0).count()
    }
}

/// Density-gated mask for every `(color, rotation)` a candidate references.
fn density_gates(
    candidates: &[Candidate],
    scans: &[&ScanRaster],
    params: &TermParams,
) -> HashMap<(usize, usize), Mask> {
    let mut gates = HashMap::new();
    for (candidate, scan) in candidates.iter().zip(scans) {
        gates
            .entry((candidate.color, candidate.rotation))
            .or_insert_with(|| {
                scan.mask
                    .support_gate(params.density_radius, params.density_min_support)
            });
    }
    gates
}
