//! Linearly interpolated percentiles over sorted data.

/// Computes a single percentile value from sorted data.
///
/// Uses linear interpolation between the two closest ranks. For a dataset
/// with `n` values the percentile `p` sits at fractional position
/// `h = (n - 1) * p / 100`, and the result is
/// `x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])`.
///
/// # Returns
///
/// The value at the specified percentile. Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use oncostat_stats::percentiles::compute_percentile;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
///
/// assert_eq!(compute_percentile(&values, 50.0), 3.0);
/// assert_eq!(compute_percentile(&values, 25.0), 2.0);
/// assert_eq!(compute_percentile(&values, 62.5), 3.5);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }
    let last = sorted_values.len() - 1;
    let position = (last as f64 * percentile.clamp(0.0, 100.0)) / 100.0;
    let lower = (position.floor() as usize).min(last);
    let upper = (lower + 1).min(last);
    let fraction = position - lower as f64;
    sorted_values[lower] + fraction * (sorted_values[upper] - sorted_values[lower])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value() {
        let values = [7.5];
        for p in [0.0, 25.0, 50.0, 100.0] {
            assert_eq!(compute_percentile(&values, p), 7.5);
        }
    }

    #[test]
    fn test_extremes_are_min_and_max() {
        let values = [1.0, 4.0, 9.0, 16.0];
        assert_eq!(compute_percentile(&values, 0.0), 1.0);
        assert_eq!(compute_percentile(&values, 100.0), 16.0);
    }

    #[test]
    fn test_interpolates_between_ranks() {
        let values = [10.0, 20.0, 30.0, 40.0];
        // h = 3 * 0.25 = 0.75 -> 10 + 0.75 * 10
        assert!((compute_percentile(&values, 25.0) - 17.5).abs() < 1e-12);
        // h = 1.5 -> 20 + 0.5 * 10
        assert!((compute_percentile(&values, 50.0) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_is_nan() {
        assert!(compute_percentile(&[], 50.0).is_nan());
    }
}
