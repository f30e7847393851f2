use serde::Serialize;

/// Population mean with the sample (n - 1) standard deviation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MeanSigma {
    pub mean: f64,
    pub sigma: f64,
}

impl MeanSigma {
    /// True when `sigma` can be divided by.
    pub fn is_usable(&self) -> bool {
        self.sigma.is_finite() && self.sigma > 0.0
    }

    #[inline]
    pub fn z_score(&self, v: f64) -> f64 {
        (v - self.mean) / self.sigma
    }
}

/// Mean and sample sigma of `values`; `None` with fewer than two values.
pub fn sample_mean_sigma<I>(values: I) -> Option<MeanSigma>
where
    I: IntoIterator<Item = f64>,
    I::IntoIter: Clone,
{
    let iter = values.into_iter();
    let (sum, n) = iter.clone().fold((0.0f64, 0usize), |(s, n), v| (s + v, n + 1));
    if n < 2 {
        return None;
    }
    let mean = sum / n as f64;
    let ss: f64 = iter.map(|v| (v - mean) * (v - mean)).sum();
    let sigma = (ss / (n - 1) as f64).sqrt();
    Some(MeanSigma { mean, sigma })
}
