//! Benign versus malignant comparison of each numeric feature
//!
//! Two independent views of the same question are computed per feature:
//!
//! - [`FeatureComparison`]: Student's t-test (pooled variance) with Cohen's d,
//!   plus Welch's t-test as a supplementary result
//! - [`FeatureAnova`]: one-way ANOVA with eta-squared
//!
//! Significance is decided by the t-test and ANOVA p-values only. Missing
//! values are dropped per feature.

use std::collections::BTreeMap;

use oncostat_stats::{
    descriptive::{DescriptiveStats, is_constant, mean, sum_of_squares},
    error::StatsError,
    hypothesis::{Anova, TTest, cohens_d},
};
use serde::Serialize;

use crate::{
    dataset::{Cohort, Diagnosis, Feature},
    error::{DegenerateInputError, TestKind},
};

/// Size, mean and sample standard deviation of one diagnosis group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl GroupSummary {
    fn new(values: &[f64]) -> Option<Self> {
        let stats = DescriptiveStats::new(values.iter().copied())?;
        Some(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev?,
        })
    }
}

/// Two-sample comparison of a feature between the diagnosis groups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureComparison {
    /// Student t statistic, positive when the benign mean is larger.
    pub t_statistic: f64,
    /// `n_benign + n_malignant - 2`.
    pub df: f64,
    pub p_value: f64,
    /// `(mean_benign - mean_malignant) / pooled_sd`.
    pub cohens_d: f64,
    pub benign: GroupSummary,
    pub malignant: GroupSummary,
    /// `p_value < significance_level`.
    pub significant: bool,
    /// Welch's unequal-variance t-test on the same samples.
    pub welch: TTest,
}

impl FeatureComparison {
    /// Whether malignant tumors have the larger mean.
    #[must_use]
    pub fn malignant_higher(&self) -> bool {
        self.malignant.mean > self.benign.mean
    }
}

/// Compares one feature between benign and malignant rows.
pub fn compare_feature(
    cohort: &Cohort<'_>,
    feature: Feature,
    significance_level: f64,
) -> Result<FeatureComparison, DegenerateInputError> {
    let degenerate = |test| move |source| DegenerateInputError::new(test, feature.name(), source);

    let benign = cohort.group_values(feature, Diagnosis::Benign);
    let malignant = cohort.group_values(feature, Diagnosis::Malignant);

    let student = TTest::student(&benign, &malignant).map_err(degenerate(TestKind::TTest))?;
    let welch = TTest::welch(&benign, &malignant).map_err(degenerate(TestKind::WelchTTest))?;
    let cohens_d = cohens_d(&benign, &malignant).map_err(degenerate(TestKind::CohensD))?;

    // Both groups hold at least two values once the t-test succeeded.
    let insufficient = || StatsError::InsufficientData {
        required: 2,
        actual: benign.len().min(malignant.len()),
    };
    let benign_summary = GroupSummary::new(&benign)
        .ok_or_else(insufficient)
        .map_err(degenerate(TestKind::TTest))?;
    let malignant_summary = GroupSummary::new(&malignant)
        .ok_or_else(insufficient)
        .map_err(degenerate(TestKind::TTest))?;

    Ok(FeatureComparison {
        t_statistic: student.statistic,
        df: student.df,
        p_value: student.p_value,
        cohens_d,
        benign: benign_summary,
        malignant: malignant_summary,
        significant: student.p_value < significance_level,
        welch,
    })
}

/// Compares every feature, failing on the first degenerate one.
pub fn compare_features(
    cohort: &Cohort<'_>,
    significance_level: f64,
) -> Result<BTreeMap<Feature, FeatureComparison>, DegenerateInputError> {
    let comparisons = Feature::ALL
        .into_iter()
        .map(|feature| {
            compare_feature(cohort, feature, significance_level).map(|result| (feature, result))
        })
        .collect::<Result<BTreeMap<_, _>, _>>()?;
    log::debug!("compared {} features with t-tests", comparisons.len());
    Ok(comparisons)
}

/// One-way ANOVA of a feature across the diagnosis groups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureAnova {
    pub f_statistic: f64,
    pub df_between: f64,
    pub df_within: f64,
    pub p_value: f64,
    /// `SS_between / SS_total`, the share of variance explained by the diagnosis.
    pub eta_squared: f64,
    pub significant: bool,
}

/// Runs a one-way ANOVA of one feature across both diagnosis groups.
pub fn anova_feature(
    cohort: &Cohort<'_>,
    feature: Feature,
    significance_level: f64,
) -> Result<FeatureAnova, DegenerateInputError> {
    let degenerate = |source| DegenerateInputError::new(TestKind::Anova, feature.name(), source);

    let benign = cohort.group_values(feature, Diagnosis::Benign);
    let malignant = cohort.group_values(feature, Diagnosis::Malignant);
    let anova = Anova::one_way(&[&benign, &malignant]).map_err(degenerate)?;

    let values = cohort.values(feature);
    if is_constant(&values) {
        return Err(degenerate(StatsError::ZeroVariance));
    }
    let grand_mean = mean(&values)
        .ok_or(StatsError::InsufficientData {
            required: 1,
            actual: 0,
        })
        .map_err(degenerate)?;
    let ss_total = sum_of_squares(&values, grand_mean);

    Ok(FeatureAnova {
        f_statistic: anova.f_statistic,
        df_between: anova.df_between,
        df_within: anova.df_within,
        p_value: anova.p_value,
        eta_squared: anova.ss_between / ss_total,
        significant: anova.p_value < significance_level,
    })
}

/// Runs the ANOVA for every feature, failing on the first degenerate one.
pub fn anova_features(
    cohort: &Cohort<'_>,
    significance_level: f64,
) -> Result<BTreeMap<Feature, FeatureAnova>, DegenerateInputError> {
    let results = Feature::ALL
        .into_iter()
        .map(|feature| {
            anova_feature(cohort, feature, significance_level).map(|result| (feature, result))
        })
        .collect::<Result<BTreeMap<_, _>, _>>()?;
    log::debug!("ran one-way ANOVA on {} features", results.len());
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dataset::{Column, Dataset, tests::record},
        snapshot::tests::seeded_records,
    };

    // benign sizes have mean 10 and sd 5, malignant mean 15 and sd 5
    fn dataset() -> Dataset {
        Dataset::from_records(&[
            record(1, Diagnosis::Benign, [5.0, 0.10, 0.06, 35.0]),
            record(2, Diagnosis::Benign, [10.0, 0.12, 0.08, 52.0]),
            record(3, Diagnosis::Benign, [15.0, 0.09, 0.07, 47.0]),
            record(4, Diagnosis::Malignant, [10.0, 0.07, 0.13, 66.0]),
            record(5, Diagnosis::Malignant, [15.0, 0.08, 0.11, 58.0]),
            record(6, Diagnosis::Malignant, [20.0, 0.09, 0.12, 71.0]),
        ])
    }

    #[test]
    fn test_cohens_d_sign_and_magnitude() {
        let dataset = dataset();
        let cohort = Cohort::new(&dataset).unwrap();
        let result = compare_feature(&cohort, Feature::TumorSize, 0.05).unwrap();

        assert!((result.cohens_d + 1.0).abs() < 1e-12);
        assert_eq!(result.benign.mean, 10.0);
        assert_eq!(result.malignant.mean, 15.0);
        assert_eq!(result.benign.std_dev, 5.0);
        assert_eq!(result.benign.count, 3);
        assert!(result.malignant_higher());
        assert!(result.t_statistic < 0.0);
        assert_eq!(result.df, 4.0);
    }

    #[test]
    fn test_significance_follows_level() {
        let dataset = dataset();
        let cohort = Cohort::new(&dataset).unwrap();
        let strict = compare_feature(&cohort, Feature::TumorSize, 0.0).unwrap();
        let lax = compare_feature(&cohort, Feature::TumorSize, 1.0).unwrap();
        assert!(!strict.significant);
        assert!(lax.significant);
        assert_eq!(strict.p_value, lax.p_value);
    }

    #[test]
    fn test_welch_is_reported_alongside() {
        let dataset = dataset();
        let cohort = Cohort::new(&dataset).unwrap();
        let result = compare_feature(&cohort, Feature::TumorSize, 0.05).unwrap();
        // equal sizes: same statistic, df shrinks only with unequal variances
        assert!((result.welch.statistic - result.t_statistic).abs() < 1e-12);
        assert!((result.welch.df - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_anova_matches_squared_t() {
        let dataset = dataset();
        let cohort = Cohort::new(&dataset).unwrap();
        for feature in Feature::ALL {
            let t = compare_feature(&cohort, feature, 0.05).unwrap();
            let f = anova_feature(&cohort, feature, 0.05).unwrap();
            let t_squared = t.t_statistic.powi(2);
            assert!(
                (f.f_statistic - t_squared).abs() <= 1e-9 * t_squared.max(1.0),
                "{feature}: F = {}, t^2 = {t_squared}",
                f.f_statistic
            );
            assert!((f.p_value - t.p_value).abs() < 1e-9);
            assert!((0.0..=1.0).contains(&f.eta_squared));
        }
    }

    #[test]
    fn test_eta_squared_reference() {
        let dataset = dataset();
        let cohort = Cohort::new(&dataset).unwrap();
        let f = anova_feature(&cohort, Feature::TumorSize, 0.05).unwrap();
        // SSB = 6 * 2.5^2 = 37.5, SST = 37.5 + 2 * 50
        assert!((f.eta_squared - 37.5 / 137.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_variance_feature_is_degenerate() {
        let dataset = dataset().with_column(
            "Smoothness",
            Column::Numeric(vec![Some(0.25); 6]),
        );
        let cohort = Cohort::new(&dataset).unwrap();

        let err = compare_feature(&cohort, Feature::Smoothness, 0.05).unwrap_err();
        assert_eq!(err.test, TestKind::TTest);
        assert_eq!(err.subject, "Smoothness");
        assert_eq!(err.source, StatsError::ZeroVariance);

        let err = anova_feature(&cohort, Feature::Smoothness, 0.05).unwrap_err();
        assert_eq!(err.test, TestKind::Anova);

        assert!(compare_features(&cohort, 0.05).is_err());
        assert!(compare_feature(&cohort, Feature::TumorSize, 0.05).is_ok());
    }

    #[test]
    fn test_inexact_constant_feature_is_degenerate() {
        for value in [0.1, 0.3, 52.7] {
            let dataset = Dataset::from_records(&seeded_records(5))
                .with_column("Smoothness", Column::Numeric(vec![Some(value); 100]));
            let cohort = Cohort::new(&dataset).unwrap();

            let err = compare_feature(&cohort, Feature::Smoothness, 0.05).unwrap_err();
            assert_eq!(err.test, TestKind::TTest);
            assert_eq!(err.source, StatsError::ZeroVariance, "value = {value}");

            let err = anova_feature(&cohort, Feature::Smoothness, 0.05).unwrap_err();
            assert_eq!(err.test, TestKind::Anova);
            assert_eq!(err.source, StatsError::ZeroVariance, "value = {value}");
        }
    }

    #[test]
    fn test_constant_within_each_group_is_degenerate() {
        // the first 70 seeded rows are benign, the last 30 malignant
        let smoothness = (0..100)
            .map(|i| Some(if i < 70 { 0.1 } else { 0.3 }))
            .collect();
        let dataset = Dataset::from_records(&seeded_records(5))
            .with_column("Smoothness", Column::Numeric(smoothness));
        let cohort = Cohort::new(&dataset).unwrap();

        let err = compare_feature(&cohort, Feature::Smoothness, 0.05).unwrap_err();
        assert_eq!(err.source, StatsError::ZeroVariance);
        let err = anova_feature(&cohort, Feature::Smoothness, 0.05).unwrap_err();
        assert_eq!(err.source, StatsError::ZeroVariance);
    }

    #[test]
    fn test_small_group_is_degenerate() {
        let dataset = dataset().with_column(
            "Compactness",
            Column::Numeric(vec![Some(0.06), Some(0.08), Some(0.07), Some(0.13), None, None]),
        );
        let cohort = Cohort::new(&dataset).unwrap();
        let err = compare_feature(&cohort, Feature::Compactness, 0.05).unwrap_err();
        assert_eq!(
            err.source,
            StatsError::InsufficientData {
                required: 2,
                actual: 1
            }
        );
        assert_eq!(
            err.to_string(),
            "t-test is undefined for Compactness: at least 2 observations are required, got 1"
        );
    }

    #[test]
    fn test_results_keyed_in_feature_order() {
        let dataset = dataset();
        let cohort = Cohort::new(&dataset).unwrap();
        let comparisons = compare_features(&cohort, 0.05).unwrap();
        let anova = anova_features(&cohort, 0.05).unwrap();
        assert!(comparisons.keys().copied().eq(Feature::ALL));
        assert!(anova.keys().copied().eq(Feature::ALL));
    }
}
