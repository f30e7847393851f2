use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Stable external identifier of a candidate, independent of its position in
/// the candidate sequence.
pub type CandidateId = i64;

/// Position of a candidate in the input sequence. Term keys are built from these.
pub type CandidateIndex = usize;

/// A placement hypothesis of one scan against the floor plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub x: i32,
    pub y: i32,
    pub rotation: usize,
    pub color: usize,
    /// Committed placement contributing hard evidence with weight `w`.
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub w: f64,
}

impl Candidate {
    pub fn unlocked(id: CandidateId, x: i32, y: i32, color: usize, rotation: usize) -> Self {
        Self {
            id,
            x,
            y,
            rotation,
            color,
            locked: false,
            w: 0.0,
        }
    }

    pub fn locked(id: CandidateId, x: i32, y: i32, color: usize, rotation: usize, w: f64) -> Self {
        Self {
            locked: true,
            w,
            ..Self::unlocked(id, x, y, color, rotation)
        }
    }

    /// Placement position in floor-plan cells.
    #[inline]
    pub fn center(&self) -> Vector2<f64> {
        Vector2::new(self.x as f64, self.y as f64)
    }
}
