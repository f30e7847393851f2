use crate::types::CandidateIndex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TermError {
    #[error("candidate {candidate} references missing scan (color={color}, rotation={rotation})")]
    MissingScan {
        candidate: CandidateIndex,
        color: usize,
        rotation: usize,
    },
    #[error("building scale must be finite and positive, got {0}")]
    InvalidScale(f64),
    #[error("kernel sigma must be finite and positive, got [{0}, {1}]")]
    InvalidKernel(f64, f64),
    #[error("cannot standardise {entries} term(s) (sigma={sigma})")]
    DegenerateDistribution { entries: usize, sigma: f64 },
}
