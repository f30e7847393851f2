//! [`TermBuilder`]: run a full pipeline and get the table with a stage trace.
//!
//! ```no_run
//! use high_order_terms::{TermBuilder, TermParams, UnwantedNeighbors};
//! use high_order_terms::scan::PlacementInputs;
//!
//! # fn example(inputs: PlacementInputs<'_>) -> Result<(), high_order_terms::TermError> {
//! let builder = TermBuilder::new(TermParams::default().with_scale(20.0));
//! let report = builder.build_hard(&inputs, &UnwantedNeighbors::default())?;
//! for (key, term) in report.table.iter() {
//!     println!("{key}: {:.3}", term.w);
//! }
//! # Ok(())
//! # }
//! ```
use super::params::TermParams;
use crate::diagnostics::{
    AggregationStage, ExclusionStage, GridStage, HardTermReport, InputDescriptor,
    NormalizationStage, SoftAggregationStage, SoftTermReport, SoftTermTrace, TermTrace,
};
use crate::diagnostics::timing::StageClock;
use crate::error::TermError;
use crate::exclusion::{apply_exclusions, UnwantedNeighbors};
use crate::grid::{HardEvidenceGrid, SoftEvidenceGrid};
use crate::scan::PlacementInputs;
use crate::terms::{aggregate_soft_terms, aggregate_terms, normalize_terms};
use log::debug;

/// Builds higher-order term tables from placement inputs.
#[derive(Clone, Debug, Default)]
pub struct TermBuilder {
    params: TermParams,
}

impl TermBuilder {
    pub fn new(params: TermParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TermParams {
        &self.params
    }

    /// Hard pipeline: grid -> exclusions -> aggregation -> normalisation.
    pub fn build_hard(
        &self,
        inputs: &PlacementInputs<'_>,
        unwanted: &UnwantedNeighbors,
    ) -> Result<HardTermReport, TermError> {
        let params = &self.params;
        let input = InputDescriptor::from_inputs(inputs);
        debug!(
            "TermBuilder::build_hard start {}x{} candidates={} locked={}",
            input.width, input.height, input.candidates, input.locked
        );
        let mut clock = StageClock::start();

        let (accumulated, grid_ms) =
            clock.time("grid", || HardEvidenceGrid::accumulate(inputs, params));
        let (mut grid, grid_stats) = accumulated?;
        let grid_stage = GridStage {
            elapsed_ms: grid_ms,
            stats: grid_stats,
            owned_cells: Some(grid.owned_cells()),
        };

        let (exclusion_stats, exclusion_ms) = clock.time("exclusion", || {
            apply_exclusions(&mut grid, inputs.candidates, unwanted)
        });
        let exclusion = ExclusionStage {
            elapsed_ms: exclusion_ms,
            relation_size: unwanted.len(),
            stats: exclusion_stats,
        };

        let ((mut table, aggregation_stats), aggregation_ms) =
            clock.time("aggregation", || aggregate_terms(&grid, params));
        let aggregation = AggregationStage {
            elapsed_ms: aggregation_ms,
            stats: aggregation_stats,
        };

        let (normalized, normalization_ms) =
            clock.time("normalization", || normalize_terms(&mut table, params));
        let normalization = NormalizationStage {
            elapsed_ms: normalization_ms,
            stats: normalized?,
        };

        let timings = clock.finish();
        debug!(
            "TermBuilder::build_hard done terms={} total_ms={:.3}",
            table.len(),
            timings.total_ms
        );
        Ok(HardTermReport {
            table,
            trace: TermTrace {
                input,
                timings,
                grid: grid_stage,
                exclusion,
                aggregation,
                normalization,
            },
            grid,
        })
    }

    /// Soft pipeline: soft-assignment grid -> per-key vector sums.
    pub fn build_soft(&self, inputs: &PlacementInputs<'_>) -> Result<SoftTermReport, TermError> {
        let input = InputDescriptor::from_inputs(inputs);
        debug!(
            "TermBuilder::build_soft start {}x{} candidates={}",
            input.width, input.height, input.candidates
        );
        let mut clock = StageClock::start();

        let (accumulated, grid_ms) =
            clock.time("grid", || SoftEvidenceGrid::accumulate(inputs, &self.params));
        let (grid, grid_stats) = accumulated?;

        let ((table, aggregation_stats), aggregation_ms) =
            clock.time("aggregation", || aggregate_soft_terms(&grid));

        Ok(SoftTermReport {
            table,
            trace: SoftTermTrace {
                input,
                timings: clock.finish(),
                grid: GridStage {
                    elapsed_ms: grid_ms,
                    stats: grid_stats,
                    owned_cells: None,
                },
                aggregation: SoftAggregationStage {
                    elapsed_ms: aggregation_ms,
                    stats: aggregation_stats,
                },
            },
            grid,
        })
    }
}
