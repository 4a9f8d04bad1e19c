//! Statistics utility shared by both cleaning engines.
//!
//! The batch pipeline and the streaming validator deliberately use different
//! variance conventions: sample variance (n−1) for the batch z-score stage
//! and population variance (n) for the streaming window check. The two are
//! kept as distinct functions and must not be unified.

/// Median of a slice: middle element for odd lengths, average of the two
/// middle elements for even lengths. `None` on empty input.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Arithmetic mean. `None` on empty input; callers must guard.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance, Σ(x−mean)²/(n−1). `None` for fewer than two values.
///
/// Used only by the batch z-score regime.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some(sum_sq / (values.len() - 1) as f64)
}

/// Population variance, Σ(x−mean)²/n. `None` on empty input.
///
/// Used only by the streaming regime.
pub fn population_variance(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some(sum_sq / values.len() as f64)
}

/// Absolute z-score of `x` against `mean` and `std`, with a zero-variance
/// guard: a flat history scores `0.0` when the value matches the mean and
/// positive infinity otherwise. Never NaN.
pub fn z_score(x: f64, mean: f64, std: f64) -> f64 {
    if std == 0.0 {
        if x == mean { 0.0 } else { f64::INFINITY }
    } else {
        (x - mean).abs() / std
    }
}
