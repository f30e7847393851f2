use super::stages::{
    AggregationStage, ExclusionStage, GridStage, NormalizationStage, SoftAggregationStage,
};
use super::timing::TimingBreakdown;
use crate::grid::{HardEvidenceGrid, SoftEvidenceGrid};
use crate::scan::PlacementInputs;
use crate::terms::{HighOrderTable, SoftTermTable};
use serde::Serialize;

/// Shape of the inputs a build ran on.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub candidates: usize,
    pub locked: usize,
}

impl InputDescriptor {
    pub fn from_inputs(inputs: &PlacementInputs<'_>) -> Self {
        Self {
            width: inputs.width(),
            height: inputs.height(),
            candidates: inputs.candidates.len(),
            locked: inputs.candidates.iter().filter(|c| c.locked).count(),
        }
    }
}

/// Stage-by-stage trace of a hard build.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub grid: GridStage,
    pub exclusion: ExclusionStage,
    pub aggregation: AggregationStage,
    pub normalization: NormalizationStage,
}

/// Output of the hard pipeline.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HardTermReport {
    pub table: HighOrderTable,
    pub trace: TermTrace,
    /// Filtered grid, kept for heat-map rendering.
    #[serde(skip)]
    pub grid: HardEvidenceGrid,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftTermTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub grid: GridStage,
    pub aggregation: SoftAggregationStage,
}

/// Output of the soft pipeline.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftTermReport {
    pub table: SoftTermTable,
    pub trace: SoftTermTrace,
    #[serde(skip)]
    pub grid: SoftEvidenceGrid,
}
