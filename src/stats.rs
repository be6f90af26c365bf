//! Quantile helpers for the normal Q-Q plot.
use statrs::distribution::{ContinuousCDF, Normal};

/// The standard normal quantile function. Returns NaN outside of [0, 1].
pub fn normal_quantile(prob: f64) -> f64 {
    if !(0.0..=1.0).contains(&prob) {
        return f64::NAN;
    }
    Normal::new(0.0, 1.0)
        .map(|normal| normal.inverse_cdf(prob))
        .unwrap_or(f64::NAN)
}

/// The probabilities (i - 1/2) / n, i = 1..n, at which the sorted sample is
/// compared to the theoretical quantiles.
pub fn plotting_positions(n: usize) -> Vec<f64> {
    let n_float = n as f64;
    (1..=n).map(|i| (i as f64 - 0.5) / n_float).collect()
}

/// Sample quantile by linear interpolation between order statistics, with
/// the (n - 1) * p + 1 indexing convention ("type 7"). The input must be
/// sorted ascending and non-empty.
pub fn quantile_type7(sorted: &[f64], prob: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = (n - 1) as f64 * prob.max(0.).min(1.);
            let lo = pos.floor() as usize;
            let frac = pos - lo as f64;
            if lo + 1 >= n {
                sorted[n - 1]
            } else {
                sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
            }
        }
    }
}
