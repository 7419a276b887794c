use serde::Serialize;

use crate::percentiles::compute_percentile;

/// Descriptive statistics summarizing a dataset.
///
/// This structure mirrors the classic five-number summary extended with the
/// count, mean and sample standard deviation of a dataset of `f64` values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    /// Number of values in the dataset.
    pub count: usize,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// Sample standard deviation (divisor `n - 1`).
    ///
    /// `None` when the dataset holds a single value.
    pub std_dev: Option<f64>,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The 25th percentile.
    pub q1: f64,
    /// The median value of the dataset.
    pub median: f64,
    /// The 75th percentile.
    pub q3: f64,
    /// The maximum value in the dataset.
    pub max: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// This method will sort the values internally before computing statistics.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use oncostat_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.count, 5);
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// assert_eq!(stats.q1, 2.0);
    /// assert_eq!(stats.q3, 4.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// Use this when you already have sorted data to avoid unnecessary work.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let mean = mean(sorted_values)?;
        let std_dev = sample_variance(sorted_values).map(f64::sqrt);

        Some(Self {
            count: sorted_values.len(),
            mean,
            std_dev,
            min,
            q1: compute_percentile(sorted_values, 25.0),
            median: compute_percentile(sorted_values, 50.0),
            q3: compute_percentile(sorted_values, 75.0),
            max,
        })
    }
}

/// Arithmetic mean, `None` for an empty slice.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Whether every value equals the first one.
///
/// A floating-point mean of equal values need not equal them exactly, so
/// constant samples are detected here rather than from a variance near zero.
///
/// ```
/// # use oncostat_stats::descriptive::is_constant;
/// assert!(is_constant(&[0.1; 7]));
/// assert!(!is_constant(&[0.1, 0.1, 0.2]));
/// assert!(is_constant(&[]));
/// ```
#[must_use]
pub fn is_constant(values: &[f64]) -> bool {
    values
        .split_first()
        .is_none_or(|(first, rest)| rest.iter().all(|v| v.total_cmp(first).is_eq()))
}

/// Sum of squared deviations from `center`.
#[must_use]
pub fn sum_of_squares(values: &[f64], center: f64) -> f64 {
    values.iter().map(|v| (v - center).powi(2)).sum()
}

/// Unbiased sample variance (divisor `n - 1`).
///
/// Returns `None` for fewer than two values and exactly `0.0` for a constant
/// sample.
///
/// # Examples
///
/// ```
/// # use oncostat_stats::descriptive::sample_variance;
/// assert_eq!(sample_variance(&[5.0, 10.0, 15.0]), Some(25.0));
/// assert_eq!(sample_variance(&[5.0]), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    if is_constant(values) {
        return Some(0.0);
    }
    let mean = mean(values)?;
    Some(sum_of_squares(values, mean) / (values.len() - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(DescriptiveStats::new(Vec::new()).is_none());
        assert!(mean(&[]).is_none());
    }

    #[test]
    fn test_single_value_has_no_std_dev() {
        let stats = DescriptiveStats::new([4.2]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 4.2);
        assert_eq!(stats.std_dev, None);
        assert_eq!(stats.min, 4.2);
        assert_eq!(stats.max, 4.2);
    }

    #[test]
    fn test_constant_values() {
        let stats = DescriptiveStats::new(vec![3.5; 8]).unwrap();
        assert_eq!(stats.mean, 3.5);
        assert_eq!(stats.std_dev, Some(0.0));
        assert_eq!(stats.q1, 3.5);
        assert_eq!(stats.q3, 3.5);
    }

    #[test]
    fn test_inexact_constant_has_zero_std_dev() {
        for value in [0.1, 0.3, 52.7] {
            let stats = DescriptiveStats::new(vec![value; 37]).unwrap();
            assert_eq!(stats.std_dev, Some(0.0), "value = {value}");
            assert_eq!(stats.min, value);
            assert_eq!(stats.max, value);
            assert_eq!(sample_variance(&[value; 3]), Some(0.0));
        }
    }

    #[test]
    fn test_is_constant() {
        assert!(is_constant(&[52.7]));
        assert!(is_constant(&[0.3; 70]));
        assert!(!is_constant(&[0.3, 0.30000000000000004]));
    }

    #[test]
    fn test_sample_std_dev_uses_n_minus_one() {
        let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.mean, 5.0);
        // population variance is 4, sample variance is 32 / 7
        let expected = (32.0_f64 / 7.0).sqrt();
        assert!((stats.std_dev.unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_quartiles_interpolate() {
        let stats = DescriptiveStats::new([1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(stats.q1, 1.75);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q3, 3.25);
    }

    #[test]
    fn test_serializes_missing_std_dev_as_null() {
        let stats = DescriptiveStats::new([1.0]).unwrap();
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["count"], 1);
        assert!(json["std_dev"].is_null());
        assert_eq!(json["median"], 1.0);
    }

    #[test]
    #[should_panic(expected = "values must be sorted")]
    fn test_from_sorted_rejects_unsorted() {
        let _ = DescriptiveStats::from_sorted(&[3.0, 1.0]);
    }
}
