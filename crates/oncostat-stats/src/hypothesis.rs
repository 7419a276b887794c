//! Parametric tests comparing group means.
//!
//! - [`TTest`]: independent two-sample t-tests (Student and Welch)
//! - [`Anova`]: one-way analysis of variance over any number of groups
//! - [`cohens_d`]: standardized mean difference with pooled standard deviation
//!
//! All p-values are two-sided (t-test) or upper-tail (F-test) probabilities of
//! the reference distribution.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};

use crate::{
    descriptive::{is_constant, mean, sample_variance, sum_of_squares},
    error::StatsError,
};

/// Result of an independent two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TTest {
    /// The t statistic, positive when the first sample has the larger mean.
    pub statistic: f64,
    /// Degrees of freedom of the reference t distribution.
    pub df: f64,
    /// Two-sided p-value.
    pub p_value: f64,
}

impl TTest {
    /// Student's t-test assuming equal variances (pooled variance).
    ///
    /// Both samples need at least two observations, and the pooled variance
    /// must be non-zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use oncostat_stats::hypothesis::TTest;
    ///
    /// let a = [5.0, 10.0, 15.0];
    /// let b = [10.0, 15.0, 20.0];
    /// let test = TTest::student(&a, &b).unwrap();
    /// assert_eq!(test.df, 4.0);
    /// assert!(test.statistic < 0.0);
    /// assert!(test.p_value > 0.05);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn student(a: &[f64], b: &[f64]) -> Result<Self, StatsError> {
        let pooled = PooledSamples::new(a, b)?;
        let (n1, n2) = (a.len() as f64, b.len() as f64);
        let std_err = (pooled.variance * (1.0 / n1 + 1.0 / n2)).sqrt();
        if std_err <= 0.0 {
            return Err(StatsError::ZeroVariance);
        }
        let statistic = (pooled.mean_a - pooled.mean_b) / std_err;
        Self::two_sided(statistic, n1 + n2 - 2.0)
    }

    /// Welch's t-test, which does not assume equal variances.
    ///
    /// Degrees of freedom follow the Welch-Satterthwaite approximation.
    #[expect(clippy::cast_precision_loss)]
    pub fn welch(a: &[f64], b: &[f64]) -> Result<Self, StatsError> {
        let pooled = PooledSamples::new(a, b)?;
        let (n1, n2) = (a.len() as f64, b.len() as f64);
        let va = pooled.var_a / n1;
        let vb = pooled.var_b / n2;
        let std_err_sq = va + vb;
        if std_err_sq <= 0.0 {
            return Err(StatsError::ZeroVariance);
        }
        let statistic = (pooled.mean_a - pooled.mean_b) / std_err_sq.sqrt();
        let df = std_err_sq.powi(2) / (va.powi(2) / (n1 - 1.0) + vb.powi(2) / (n2 - 1.0));
        Self::two_sided(statistic, df)
    }

    fn two_sided(statistic: f64, df: f64) -> Result<Self, StatsError> {
        let dist = StudentsT::new(0.0, 1.0, df)
            .map_err(|_| StatsError::InvalidDistribution { name: "Student's t" })?;
        let p_value = (2.0 * dist.sf(statistic.abs())).min(1.0);
        Ok(Self {
            statistic,
            df,
            p_value,
        })
    }
}

/// Means and sample variances of two samples, plus their pooled variance.
struct PooledSamples {
    mean_a: f64,
    mean_b: f64,
    var_a: f64,
    var_b: f64,
    variance: f64,
}

impl PooledSamples {
    #[expect(clippy::cast_precision_loss)]
    fn new(a: &[f64], b: &[f64]) -> Result<Self, StatsError> {
        StatsError::require(2, a.len())?;
        StatsError::require(2, b.len())?;
        let insufficient = || StatsError::InsufficientData {
            required: 2,
            actual: a.len().min(b.len()),
        };
        let mean_a = mean(a).ok_or_else(insufficient)?;
        let mean_b = mean(b).ok_or_else(insufficient)?;
        let var_a = sample_variance(a).ok_or_else(insufficient)?;
        let var_b = sample_variance(b).ok_or_else(insufficient)?;
        let (n1, n2) = (a.len() as f64, b.len() as f64);
        let variance = ((n1 - 1.0) * var_a + (n2 - 1.0) * var_b) / (n1 + n2 - 2.0);
        Ok(Self {
            mean_a,
            mean_b,
            var_a,
            var_b,
            variance,
        })
    }
}

/// Cohen's d: standardized difference between two sample means.
///
/// `d = (mean(a) - mean(b)) / pooled_sd`, so a positive value means the first
/// sample has the larger mean.
///
/// # Examples
///
/// ```
/// use oncostat_stats::hypothesis::cohens_d;
///
/// // means 10 and 15, both standard deviations 5
/// let d = cohens_d(&[5.0, 10.0, 15.0], &[10.0, 15.0, 20.0]).unwrap();
/// assert!((d + 1.0).abs() < 1e-12);
/// ```
pub fn cohens_d(a: &[f64], b: &[f64]) -> Result<f64, StatsError> {
    let pooled = PooledSamples::new(a, b)?;
    standardized_difference(pooled.mean_a, pooled.mean_b, pooled.variance.sqrt())
}

/// Cohen's d from summary values.
pub fn standardized_difference(
    mean_a: f64,
    mean_b: f64,
    pooled_sd: f64,
) -> Result<f64, StatsError> {
    if pooled_sd <= 0.0 || !pooled_sd.is_finite() {
        return Err(StatsError::ZeroVariance);
    }
    Ok((mean_a - mean_b) / pooled_sd)
}

/// Result of a one-way analysis of variance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Anova {
    /// The F statistic (between-group over within-group mean square).
    pub f_statistic: f64,
    /// Degrees of freedom between groups (`k - 1`).
    pub df_between: f64,
    /// Degrees of freedom within groups (`N - k`).
    pub df_within: f64,
    /// Upper-tail p-value of the F distribution.
    pub p_value: f64,
    /// Between-group sum of squares around the grand mean.
    pub ss_between: f64,
    /// Within-group sum of squares around each group mean.
    pub ss_within: f64,
}

impl Anova {
    /// One-way ANOVA over the given groups.
    ///
    /// Requires at least two non-empty groups, more observations than groups,
    /// and non-zero within-group variance.
    ///
    /// # Examples
    ///
    /// ```
    /// use oncostat_stats::hypothesis::Anova;
    ///
    /// let anova = Anova::one_way(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]).unwrap();
    /// assert_eq!(anova.df_between, 1.0);
    /// assert_eq!(anova.df_within, 4.0);
    /// assert!((anova.f_statistic - 13.5).abs() < 1e-9);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn one_way(groups: &[&[f64]]) -> Result<Self, StatsError> {
        StatsError::require(2, groups.len())?;
        let min_group = groups.iter().map(|g| g.len()).min().unwrap_or(0);
        StatsError::require(1, min_group)?;
        let total: usize = groups.iter().map(|g| g.len()).sum();
        StatsError::require(groups.len() + 1, total)?;

        let grand_mean = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / total as f64;
        let mut ss_between = 0.0;
        let mut ss_within = 0.0;
        for group in groups {
            let Some(group_mean) = mean(group) else {
                continue;
            };
            ss_between += group.len() as f64 * (group_mean - grand_mean).powi(2);
            if !is_constant(group) {
                ss_within += sum_of_squares(group, group_mean);
            }
        }
        if ss_within <= 0.0 {
            return Err(StatsError::ZeroVariance);
        }

        let df_between = (groups.len() - 1) as f64;
        let df_within = (total - groups.len()) as f64;
        let f_statistic = (ss_between / df_between) / (ss_within / df_within);
        let dist = FisherSnedecor::new(df_between, df_within)
            .map_err(|_| StatsError::InvalidDistribution { name: "F" })?;
        let p_value = dist.sf(f_statistic);

        Ok(Self {
            f_statistic,
            df_between,
            df_within,
            p_value,
            ss_between,
            ss_within,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BENIGN: [f64; 8] = [9.1, 11.4, 8.7, 10.2, 12.9, 7.8, 10.5, 9.9];
    const MALIGNANT: [f64; 6] = [14.2, 16.8, 13.1, 18.4, 15.0, 12.7];

    #[test]
    fn test_student_reference_values() {
        // equal sizes and variances: t = (10 - 15) / sqrt(25 * (1/3 + 1/3))
        let test = TTest::student(&[5.0, 10.0, 15.0], &[10.0, 15.0, 20.0]).unwrap();
        let expected = -5.0 / (25.0_f64 * 2.0 / 3.0).sqrt();
        assert!((test.statistic - expected).abs() < 1e-12);
        assert_eq!(test.df, 4.0);
        assert!(test.p_value > 0.0 && test.p_value < 1.0);
    }

    #[test]
    fn test_student_is_antisymmetric() {
        let ab = TTest::student(&BENIGN, &MALIGNANT).unwrap();
        let ba = TTest::student(&MALIGNANT, &BENIGN).unwrap();
        assert!((ab.statistic + ba.statistic).abs() < 1e-12);
        assert!((ab.p_value - ba.p_value).abs() < 1e-12);
        assert!(ab.p_value < 0.001);
    }

    #[test]
    fn test_identical_samples_are_not_significant() {
        let test = TTest::student(&BENIGN, &BENIGN).unwrap();
        assert_eq!(test.statistic, 0.0);
        assert!((test.p_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_welch_matches_student_for_balanced_equal_variance() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [3.0, 4.0, 5.0, 6.0];
        let student = TTest::student(&a, &b).unwrap();
        let welch = TTest::welch(&a, &b).unwrap();
        assert!((student.statistic - welch.statistic).abs() < 1e-12);
        assert!((welch.df - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_welch_df_is_reduced_for_unequal_variances() {
        let welch = TTest::welch(&BENIGN, &MALIGNANT).unwrap();
        let df_student = (BENIGN.len() + MALIGNANT.len() - 2) as f64;
        assert!(welch.df > 0.0 && welch.df < df_student);
    }

    #[test]
    fn test_degenerate_t_tests() {
        assert_eq!(
            TTest::student(&[1.0], &[2.0, 3.0]),
            Err(StatsError::InsufficientData {
                required: 2,
                actual: 1
            })
        );
        assert_eq!(
            TTest::student(&[2.0, 2.0], &[2.0, 2.0, 2.0]),
            Err(StatsError::ZeroVariance)
        );
        assert_eq!(
            TTest::welch(&[1.0, 1.0], &[5.0, 5.0]),
            Err(StatsError::ZeroVariance)
        );
    }

    #[test]
    fn test_inexact_constant_groups_have_zero_variance() {
        for value in [0.1, 0.3, 52.7] {
            let a = vec![value; 70];
            let b = vec![value; 30];
            assert_eq!(TTest::student(&a, &b), Err(StatsError::ZeroVariance));
            assert_eq!(TTest::welch(&a, &b), Err(StatsError::ZeroVariance));
            assert_eq!(cohens_d(&a, &b), Err(StatsError::ZeroVariance));
            assert_eq!(Anova::one_way(&[&a, &b]), Err(StatsError::ZeroVariance));
        }
        // constant within each group, different between them
        let a = vec![0.1; 70];
        let b = vec![0.3; 30];
        assert_eq!(TTest::student(&a, &b), Err(StatsError::ZeroVariance));
        assert_eq!(Anova::one_way(&[&a, &b]), Err(StatsError::ZeroVariance));
    }

    #[test]
    fn test_one_constant_group_is_still_testable() {
        let constant = [0.1; 6];
        let test = TTest::student(&BENIGN, &constant).unwrap();
        assert!(test.statistic > 0.0);
        let anova = Anova::one_way(&[&BENIGN, &constant]).unwrap();
        let t_sq = test.statistic.powi(2);
        assert!(((anova.f_statistic - t_sq) / t_sq).abs() < 1e-9);
    }

    #[test]
    fn test_cohens_d_sign_convention() {
        let d = cohens_d(&[5.0, 10.0, 15.0], &[10.0, 15.0, 20.0]).unwrap();
        assert!((d + 1.0).abs() < 1e-12);
        assert_eq!(standardized_difference(10.0, 15.0, 5.0), Ok(-1.0));
        assert_eq!(
            standardized_difference(10.0, 15.0, 0.0),
            Err(StatsError::ZeroVariance)
        );
    }

    #[test]
    fn test_anova_f_equals_t_squared_for_two_groups() {
        let t = TTest::student(&BENIGN, &MALIGNANT).unwrap();
        let anova = Anova::one_way(&[&BENIGN, &MALIGNANT]).unwrap();
        let t_sq = t.statistic.powi(2);
        assert!(((anova.f_statistic - t_sq) / t_sq).abs() < 1e-9);
        assert!((anova.p_value - t.p_value).abs() < 1e-9);
    }

    #[test]
    fn test_anova_three_groups() {
        let anova =
            Anova::one_way(&[&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0], &[5.0, 6.0, 7.0]]).unwrap();
        // grand mean 11/3; SSB = 3 * ((2 - 11/3)^2 + (3 - 11/3)^2 + (6 - 11/3)^2) = 26, SSW = 6
        assert!((anova.ss_between - 26.0).abs() < 1e-9);
        assert!((anova.ss_within - 6.0).abs() < 1e-9);
        assert_eq!(anova.df_between, 2.0);
        assert_eq!(anova.df_within, 6.0);
        assert!((anova.f_statistic - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_anova() {
        assert!(Anova::one_way(&[&[1.0, 2.0]]).is_err());
        assert!(Anova::one_way(&[&[1.0, 2.0], &[]]).is_err());
        assert_eq!(
            Anova::one_way(&[&[3.0, 3.0], &[4.0, 4.0]]),
            Err(StatsError::ZeroVariance)
        );
    }
}
