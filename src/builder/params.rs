//! Parameter types configuring the term construction stages.
//!
//! The distance and penalty constants reproduce the weighting the downstream
//! placement optimizer was tuned against; change them together with it.

use crate::error::TermError;
use serde::{Deserialize, Serialize};

/// What to do when the aggregated weights cannot be standardised
/// (fewer than two terms, or zero spread).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Leave the averaged weights untouched and report the skip.
    #[default]
    Skip,
    /// Abort with [`TermError::DegenerateDistribution`].
    Fail,
}

/// Knobs shared by the hard and soft accumulation passes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermParams {
    /// Building scale in floor-plan cells per length unit; distances and
    /// kernel offsets are divided by it.
    pub scale: f64,
    /// Half-size of the density window around each scan cell.
    pub density_radius: usize,
    /// Occupied neighbours (centre excluded) required inside the window.
    pub density_min_support: usize,
    /// Weight of a cell with `n` owners is divided by `n^owner_penalty_exponent`.
    pub owner_penalty_exponent: f64,
    /// Distance factor is `distance_offset - min(distance, distance_cap)`.
    pub distance_offset: f64,
    pub distance_cap: f64,
    /// Averaged terms with `|w| <= prune_epsilon` are dropped.
    pub prune_epsilon: f64,
    /// Per-axis standard deviation of the soft-assignment kernel.
    pub kernel_sigma: [f64; 2],
    /// Scale applied to normalised soft weights.
    pub max_range: f64,
    pub degenerate_policy: DegeneratePolicy,
}

impl Default for TermParams {
    fn default() -> Self {
        Self {
            scale: 1.0,
            density_radius: 7,
            density_min_support: 1,
            owner_penalty_exponent: 1.5,
            distance_offset: 3.0,
            distance_cap: 6.0,
            prune_epsilon: 1e-3,
            kernel_sigma: [5.0, 5.0],
            max_range: 1.5,
            degenerate_policy: DegeneratePolicy::Skip,
        }
    }
}

impl TermParams {
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn validate(&self) -> Result<(), TermError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(TermError::InvalidScale(self.scale));
        }
        let [sx, sy] = self.kernel_sigma;
        if !(sx.is_finite() && sx > 0.0 && sy.is_finite() && sy > 0.0) {
            return Err(TermError::InvalidKernel(sx, sy));
        }
        Ok(())
    }

    /// Weight of a cell holding `owners` committed placements, given the raw
    /// summed owner weight and the nearest contributor distance.
    #[inline]
    pub fn owner_weight(&self, raw: f64, owners: usize, distance: f64) -> f64 {
        let penalised = raw / (owners as f64).powf(self.owner_penalty_exponent);
        penalised * (self.distance_offset - distance.min(self.distance_cap))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn owner_weight_penalises_and_scales() {
        let p = TermParams::default();
        assert_relative_eq!(p.owner_weight(2.0, 1, 1.0), 4.0);
        assert_relative_eq!(p.owner_weight(8.0, 4, 0.0), 8.0 / 8.0 * 3.0);
        // Distance is capped, so far evidence flips the sign but stays bounded.
        assert_relative_eq!(p.owner_weight(1.0, 1, 100.0), -3.0);
    }

    #[test]
    fn validate_rejects_bad_scale() {
        let p = TermParams::default().with_scale(0.0);
        assert!(matches!(p.validate(), Err(TermError::InvalidScale(_))));
        let p = TermParams::default().with_scale(f64::NAN);
        assert!(p.validate().is_err());
        assert!(TermParams::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let p: TermParams =
            serde_json::from_str(r#"{"scale": 20.0, "degenerate_policy": "fail"}"#).unwrap();
        assert_eq!(p.scale, 20.0);
        assert_eq!(p.degenerate_policy, DegeneratePolicy::Fail);
        assert_eq!(p.density_radius, 7);
        assert_eq!(p.kernel_sigma, [5.0, 5.0]);
    }
}
