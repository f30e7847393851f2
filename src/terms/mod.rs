//! Higher-order term tables and the passes that build them.
//!
//! Hard pipeline: [`aggregate_terms`] folds a filtered hard grid into a
//! [`HighOrderTable`] (running average per subset key, negligible entries
//! pruned), then [`normalize_terms`] re-expresses the weights as z-scores and
//! keeps only the above-average terms.
//!
//! Soft pipeline: [`aggregate_soft_terms`] sums per-candidate soft weight
//! vectors per key into a [`SoftTermTable`]. No averaging or normalisation.
//!
//! Both tables are ordered maps so iteration, statistics and serialisation
//! are reproducible run to run.

mod aggregate;
mod normalize;
mod soft;
mod stats;
mod table;

pub use aggregate::{aggregate_terms, AggregationStats};
pub use normalize::{normalize_terms, NormalizationOutcome, NormalizationStats};
pub use soft::{aggregate_soft_terms, SoftAggregationStats};
pub use stats::{sample_mean_sigma, MeanSigma};
pub use table::{HighOrderTable, SoftTermTable, TermEntry};
