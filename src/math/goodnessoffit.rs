//! Kolmogorov–Smirnov one-sample check of drawn values against a known CDF.

/// Largest vertical distance between the empirical CDF of `samples` and `cdf`.
///
/// Returns `None` for an empty sample.
pub fn kolmogorov_smirnov_statistic<F>(samples: &[f64], cdf: F) -> Option<f64>
where
    F: Fn(f64) -> f64,
{
    if samples.is_empty() {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len() as f64;
    let mut d_max = 0.0_f64;

    for (i, &value) in sorted.iter().enumerate() {
        let expected = cdf(value);
        let below = expected - i as f64 / n;
        let above = (i + 1) as f64 / n - expected;
        d_max = d_max.max(below).max(above);
    }

    Some(d_max)
}

/// Asymptotic critical value of the KS statistic for `n` samples at level `alpha`.
pub fn kolmogorov_smirnov_critical_value(n: usize, alpha: f64) -> f64 {
    let c = (-(alpha / 2.0).ln() / 2.0).sqrt();
    c / (n as f64).sqrt()
}
