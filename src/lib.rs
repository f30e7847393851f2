#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod builder;
pub mod diagnostics;
pub mod error;
pub mod exclusion;
pub mod scan;
pub mod terms;
pub mod types;

// Lower-level building blocks, public for tools and tests.
pub mod config;
pub mod grid;
pub mod heatmap;
pub mod key;
pub mod raster;

// --- High-level re-exports -------------------------------------------------

pub use crate::builder::{DegeneratePolicy, TermBuilder, TermParams};
pub use crate::diagnostics::{HardTermReport, SoftTermReport};
pub use crate::error::TermError;
pub use crate::exclusion::UnwantedNeighbors;
pub use crate::key::SubsetKey;
pub use crate::terms::{HighOrderTable, SoftTermTable, TermEntry};
pub use crate::types::{Candidate, CandidateId, CandidateIndex};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use high_order_terms::prelude::*;
/// use nalgebra::Vector2;
///
/// # fn main() -> Result<(), TermError> {
/// let (w, h) = (64usize, 48usize);
/// let plan = vec![0u8; w * h];
/// let scans = ScanSet::new(vec![vec![ScanRaster::new(
///     Mask::from_fn(8, 8, |_, _| true),
///     Vector2::new(4, 4),
/// )]]);
/// let candidates = vec![
///     Candidate::locked(1, 20, 20, 0, 0, 1.0),
///     Candidate::unlocked(2, 22, 20, 0, 0),
/// ];
/// let inputs = PlacementInputs::new(&candidates, &scans, RasterU8::new(w, h, &plan));
///
/// let builder = TermBuilder::new(TermParams::default());
/// let report = builder.build_hard(&inputs, &UnwantedNeighbors::default())?;
/// println!("terms={} total_ms={:.3}", report.table.len(), report.trace.timings.total_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::raster::{Mask, RasterU8};
    pub use crate::scan::{PlacementInputs, ScanRaster, ScanSet};
    pub use crate::{Candidate, TermBuilder, TermError, TermParams, UnwantedNeighbors};
}

// --- Stage-level API (for tools & advanced users) ---------------------------

pub mod stages {
    pub use crate::exclusion::apply_exclusions;
    pub use crate::grid::{HardEvidenceGrid, SoftEvidenceGrid};
    pub use crate::terms::{aggregate_soft_terms, aggregate_terms, normalize_terms};

    pub use crate::diagnostics::{
        AggregationStage, ExclusionStage, GridStage, InputDescriptor, NormalizationStage,
        SoftAggregationStage, StageTiming, TimingBreakdown,
    };
}
