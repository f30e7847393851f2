use crate::exclusion::ExclusionStats;
use crate::grid::GridStats;
use crate::terms::{AggregationStats, NormalizationStats, SoftAggregationStats};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridStage {
    pub elapsed_ms: f64,
    #[serde(flatten)]
    pub stats: GridStats,
    /// Cells holding at least one owner (hard grid only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned_cells: Option<usize>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionStage {
    pub elapsed_ms: f64,
    /// Entries in the unwanted-neighbour relation.
    pub relation_size: usize,
    #[serde(flatten)]
    pub stats: ExclusionStats,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationStage {
    pub elapsed_ms: f64,
    #[serde(flatten)]
    pub stats: AggregationStats,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizationStage {
    pub elapsed_ms: f64,
    #[serde(flatten)]
    pub stats: NormalizationStats,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftAggregationStage {
    pub elapsed_ms: f64,
    #[serde(flatten)]
    pub stats: SoftAggregationStats,
}
