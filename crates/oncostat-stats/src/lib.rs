//! Statistical primitives for the Oncostat project.
//!
//! This crate provides the building blocks of the cohort analysis:
//!
//! - **Descriptive statistics**: count, mean, sample standard deviation and quartiles
//! - **Percentiles**: linearly interpolated percentile values
//! - **Shape**: bias-adjusted skewness and excess kurtosis
//! - **Hypothesis tests**: two-sample t-tests, effect sizes and one-way ANOVA
//! - **Contingency tables**: chi-square test of independence and Cramér's V
//! - **Correlation**: Pearson correlation coefficient
//! - **Binning**: right-closed interval bins over fixed edges
//!
//! Every fallible computation reports a [`error::StatsError`] instead of
//! returning `NaN`.
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Interpolated percentiles of sorted data
//! - [`moments`]: Skewness and kurtosis
//! - [`hypothesis`]: t-tests, Cohen's d and ANOVA
//! - [`contingency`]: Chi-square test of independence
//! - [`correlation`]: Pearson correlation
//! - [`binning`]: Fixed-edge interval bins
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use oncostat_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.median, 3.0);
//! ```
//!
//! ## Comparing two groups
//!
//! ```
//! use oncostat_stats::hypothesis::{TTest, cohens_d};
//!
//! let benign = [9.8, 10.4, 11.1, 9.2, 10.0, 10.7];
//! let malignant = [14.2, 15.9, 13.8, 16.4, 15.1, 14.7];
//!
//! let test = TTest::student(&malignant, &benign).unwrap();
//! assert!(test.statistic > 0.0);
//! assert!(test.p_value < 0.001);
//!
//! let d = cohens_d(&malignant, &benign).unwrap();
//! assert!(d > 0.8);
//! ```
//!
//! ## Testing association in a contingency table
//!
//! ```
//! use oncostat_stats::contingency::{ChiSquareTest, ContingencyTable};
//!
//! let table = ContingencyTable::from_counts(vec![vec![25, 5], vec![5, 25]]).unwrap();
//! let test = ChiSquareTest::independence(&table).unwrap();
//! assert!(test.yates_corrected);
//! assert!(test.p_value < 0.001);
//! ```

pub mod binning;
pub mod contingency;
pub mod correlation;
pub mod descriptive;
pub mod error;
pub mod hypothesis;
pub mod moments;
pub mod percentiles;
