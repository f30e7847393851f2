//! Term builder orchestrating the accumulation passes.
//!
//! Overview
//! - Hard pipeline: scatter every candidate's density-gated scan cells into a
//!   [`HardEvidenceGrid`](crate::grid::HardEvidenceGrid), strip unwanted
//!   neighbours of each cell's owners, fold the grid into a subset-keyed
//!   table of averaged weights, then standardise the weights and keep the
//!   above-average terms.
//! - Soft pipeline: Gaussian soft-assignment per candidate, summed per
//!   subset key into weight vectors.
//!
//! Modules
//! - [`params`] – tunables and the degenerate-distribution policy.
//! - `pipeline` – the [`TermBuilder`] implementation.

pub mod params;
mod pipeline;

pub use params::{DegeneratePolicy, TermParams};
pub use pipeline::TermBuilder;
