//! Shape statistics based on higher central moments.
//!
//! Both estimators are the bias-adjusted sample versions used by common
//! dataframe libraries, so results agree with their `skew()` and `kurt()`.
//! They are undefined (return `None`) for too few observations or a sample
//! without variance.

use crate::descriptive::{is_constant, mean};

/// Adjusted Fisher-Pearson skewness coefficient (G1).
///
/// `G1 = sqrt(n (n - 1)) / (n - 2) * m3 / m2^(3/2)` where `m2` and `m3` are the
/// biased second and third central moments.
///
/// Returns `None` for fewer than 3 values or zero variance.
///
/// # Examples
///
/// ```
/// # use oncostat_stats::moments::skewness;
/// assert_eq!(skewness(&[1.0, 2.0, 3.0]), Some(0.0));
/// assert!(skewness(&[1.0, 1.0, 1.0, 10.0]).unwrap() > 0.0);
/// assert_eq!(skewness(&[4.0, 4.0, 4.0]), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn skewness(values: &[f64]) -> Option<f64> {
    let count = values.len();
    if count < 3 || is_constant(values) {
        return None;
    }
    let n = count as f64;
    let mean = mean(values)?;
    let (m2, m3) = values.iter().fold((0.0, 0.0), |(m2, m3), v| {
        let d = v - mean;
        (m2 + d * d, m3 + d * d * d)
    });
    let (m2, m3) = (m2 / n, m3 / n);
    if m2 <= 0.0 {
        return None;
    }
    let g1 = m3 / m2.powf(1.5);
    Some((n * (n - 1.0)).sqrt() / (n - 2.0) * g1)
}

/// Bias-adjusted excess kurtosis (G2).
///
/// `G2 = n (n + 1) (n - 1) S4 / ((n - 2) (n - 3) S2^2) - 3 (n - 1)^2 / ((n - 2) (n - 3))`
/// where `S2` and `S4` are the sums of squared and fourth-power deviations.
/// A normal distribution has an excess kurtosis of 0.
///
/// Returns `None` for fewer than 4 values or zero variance.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn excess_kurtosis(values: &[f64]) -> Option<f64> {
    let count = values.len();
    if count < 4 || is_constant(values) {
        return None;
    }
    let n = count as f64;
    let mean = mean(values)?;
    let (s2, s4) = values.iter().fold((0.0, 0.0), |(s2, s4), v| {
        let d2 = (v - mean).powi(2);
        (s2 + d2, s4 + d2 * d2)
    });
    if s2 <= 0.0 {
        return None;
    }
    let numerator = n * (n + 1.0) * (n - 1.0) * s4;
    let denominator = (n - 2.0) * (n - 3.0) * s2 * s2;
    let adjustment = 3.0 * (n - 1.0).powi(2) / ((n - 2.0) * (n - 3.0));
    Some(numerator / denominator - adjustment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_sample_has_zero_skew() {
        let skew = skewness(&[-2.0, -1.0, 0.0, 1.0, 2.0]).unwrap();
        assert!(skew.abs() < 1e-12);
    }

    #[test]
    fn test_skewness_sign_follows_tail() {
        assert!(skewness(&[1.0, 2.0, 2.0, 3.0, 20.0]).unwrap() > 0.0);
        assert!(skewness(&[-20.0, 1.0, 2.0, 2.0, 3.0]).unwrap() < 0.0);
    }

    #[test]
    fn test_skewness_reference_value() {
        // sqrt(4 * 3) / 2 * (m3 / m2^1.5) for [1, 2, 3, 10]
        let values = [1.0, 2.0, 3.0, 10.0];
        let m2 = (9.0 + 4.0 + 1.0 + 36.0) / 4.0;
        let m3 = (-27.0 - 8.0 - 1.0 + 216.0) / 4.0;
        let expected = 12.0_f64.sqrt() / 2.0 * m3 / f64::powf(m2, 1.5);
        assert!((skewness(&values).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_kurtosis_reference_value() {
        // Uniform-like sample: [1, 2, 3, 4, 5]
        // S2 = 10, S4 = 34, n = 5
        // 5 * 6 * 4 * 34 / (3 * 2 * 100) - 3 * 16 / 6 = 6.8 - 8 = -1.2
        let kurt = excess_kurtosis(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((kurt + 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(skewness(&[1.0, 2.0]), None);
        assert_eq!(excess_kurtosis(&[1.0, 2.0, 3.0]), None);
        assert_eq!(excess_kurtosis(&[5.0; 10]), None);
        assert_eq!(skewness(&[5.0; 10]), None);
    }

    #[test]
    fn test_inexact_constant_has_no_shape() {
        for value in [0.1, 0.3, 52.7] {
            assert_eq!(skewness(&[value; 100]), None, "value = {value}");
            assert_eq!(excess_kurtosis(&[value; 100]), None, "value = {value}");
        }
    }
}
