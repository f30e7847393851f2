//! Diagnostics data model returned by the term builder.
//!
//! `HardTermReport` / `SoftTermReport` bundle the produced table with a trace
//! of every stage that ran: counters from the stage itself plus its wall
//! time. Everything serialises to JSON for offline inspection.

pub mod pipeline;
pub mod stages;
pub mod timing;

pub use pipeline::{HardTermReport, InputDescriptor, SoftTermReport, SoftTermTrace, TermTrace};
pub use stages::{AggregationStage, ExclusionStage, GridStage, NormalizationStage, SoftAggregationStage};
pub use timing::{StageTiming, TimingBreakdown};
