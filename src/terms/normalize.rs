use super::stats::{sample_mean_sigma, MeanSigma};
use super::table::HighOrderTable;
use crate::builder::{DegeneratePolicy, TermParams};
use crate::error::TermError;
use log::{debug, warn};
use serde::Serialize;

/// Whether the z-score pass ran.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum NormalizationOutcome {
    Applied,
    /// Weights left as averaged; `reason` says why.
    Skipped { reason: String },
}

/// Distribution summary reported by [`normalize_terms`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizationStats {
    pub entries_in: usize,
    /// Weight distribution before rescaling, when defined.
    pub weights: Option<MeanSigma>,
    /// Key-length (term arity) distribution, when defined.
    pub arity: Option<MeanSigma>,
    pub dropped: usize,
    pub retained: usize,
    pub outcome: NormalizationOutcome,
}

/// Replace every weight by its z-score and keep only strictly positive ones.
///
/// Needs at least two entries and a non-zero spread. Otherwise the table is
/// left untouched and the outcome is `Skipped`, or an error is returned under
/// [`DegeneratePolicy::Fail`].
pub fn normalize_terms(
    table: &mut HighOrderTable,
    params: &TermParams,
) -> Result<NormalizationStats, TermError> {
    let entries_in = table.len();
    let weights = sample_mean_sigma(table.weights());
    let arity = sample_mean_sigma(table.iter().map(|(key, _)| key.len() as f64));

    let dist = match weights {
        Some(s) if s.is_usable() => s,
        _ => {
            let reason = match weights {
                None => format!("{entries_in} term(s), need at least 2"),
                Some(s) => format!("weight spread is {}", s.sigma),
            };
            if params.degenerate_policy == DegeneratePolicy::Fail {
                return Err(TermError::DegenerateDistribution {
                    entries: entries_in,
                    sigma: weights.map_or(f64::NAN, |s| s.sigma),
                });
            }
            warn!("normalize_terms skipped: {reason}");
            return Ok(NormalizationStats {
                entries_in,
                weights,
                arity,
                dropped: 0,
                retained: entries_in,
                outcome: NormalizationOutcome::Skipped { reason },
            });
        }
    };

    for entry in table.entries_mut() {
        entry.w = dist.z_score(entry.w);
    }
    let dropped = table.retain(|_, entry| entry.w > 0.0);

    debug!(
        "normalize_terms mean={:.6} sigma={:.6} dropped={} retained={}",
        dist.mean,
        dist.sigma,
        dropped,
        table.len()
    );
    Ok(NormalizationStats {
        entries_in,
        weights,
        arity,
        dropped,
        retained: table.len(),
        outcome: NormalizationOutcome::Applied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::SubsetKey;
    use crate::terms::TermEntry;
    use approx::assert_relative_eq;

    fn table_of(weights: &[f64]) -> HighOrderTable {
        weights
            .iter()
            .enumerate()
            .map(|(i, &w)| (SubsetKey::from_slice(&[i]), TermEntry { w, c: 1 }))
            .collect()
    }

    #[test]
    fn keeps_only_above_mean_terms() {
        let mut table = table_of(&[1.0, 2.0, 3.0, 6.0]);
        let stats = normalize_terms(&mut table, &TermParams::default()).unwrap();
        assert_eq!(stats.outcome, NormalizationOutcome::Applied);
        let dist = stats.weights.unwrap();
        assert_relative_eq!(dist.mean, 3.0);
        assert_relative_eq!(dist.sigma, (14.0f64 / 3.0).sqrt());
        // z(3.0) == 0 is dropped along with the below-mean entries.
        assert_eq!(table.len(), 1);
        assert_relative_eq!(table.get(&[3]).unwrap().w, 3.0 / dist.sigma);
        assert_eq!(stats.dropped, 3);
    }

    #[test]
    fn z_scores_ignore_positive_scaling() {
        let raw = [0.4, 1.7, 2.2, 5.0, 9.1];
        let mut a = table_of(&raw);
        let scaled: Vec<f64> = raw.iter().map(|w| w * 37.5).collect();
        let mut b = table_of(&scaled);
        normalize_terms(&mut a, &TermParams::default()).unwrap();
        normalize_terms(&mut b, &TermParams::default()).unwrap();
        assert_eq!(a.len(), b.len());
        for ((ka, ea), (kb, eb)) in a.iter().zip(b.iter()) {
            assert_eq!(ka, kb);
            assert_relative_eq!(ea.w, eb.w, epsilon = 1e-12);
        }
    }

    #[test]
    fn single_entry_is_skipped_by_default() {
        let mut table = table_of(&[4.0]);
        let stats = normalize_terms(&mut table, &TermParams::default()).unwrap();
        assert!(matches!(stats.outcome, NormalizationOutcome::Skipped { .. }));
        assert_eq!(table.get(&[0]).unwrap().w, 4.0);
        assert!(stats.weights.is_none());
    }

    #[test]
    fn zero_spread_fails_under_fail_policy() {
        let mut table = table_of(&[2.0, 2.0, 2.0]);
        let params = TermParams {
            degenerate_policy: DegeneratePolicy::Fail,
            ..Default::default()
        };
        let err = normalize_terms(&mut table, &params).unwrap_err();
        assert!(matches!(
            err,
            TermError::DegenerateDistribution { entries: 3, .. }
        ));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn empty_table_never_yields_nan() {
        let mut table = HighOrderTable::new();
        let stats = normalize_terms(&mut table, &TermParams::default()).unwrap();
        assert!(table.is_empty());
        assert_eq!(stats.retained, 0);
    }

    #[test]
    fn reports_arity_statistics() {
        let mut table: HighOrderTable = [
            (SubsetKey::from_slice(&[0]), TermEntry { w: 1.0, c: 1 }),
            (SubsetKey::from_slice(&[0, 1, 2]), TermEntry { w: 3.0, c: 2 }),
        ]
        .into_iter()
        .collect();
        let stats = normalize_terms(&mut table, &TermParams::default()).unwrap();
        let arity = stats.arity.unwrap();
        assert_relative_eq!(arity.mean, 2.0);
        assert_relative_eq!(arity.sigma, 2f64.sqrt());
    }
}
