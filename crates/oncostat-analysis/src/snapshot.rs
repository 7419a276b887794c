//! Full analysis of one dataset
//!
//! [`analyze`] validates a [`Dataset`] and runs every sub-analysis over the
//! same read-only [`Cohort`]:
//!
//! 1. descriptive summaries ([`describe`])
//! 2. t-tests with effect sizes ([`compare_features`])
//! 3. one-way ANOVA ([`anova_features`])
//! 4. age × diagnosis association ([`age_association`])
//! 5. correlation matrix ([`CorrelationMatrix`])
//!
//! The sub-analyses run on scoped threads unless [`AnalysisOptions::parallel`]
//! is disabled. Either all of them succeed and an [`AnalysisSnapshot`] is
//! returned, or the call fails with the error of the first failing
//! sub-analysis in the order above. Only the t-tests, the ANOVA and the
//! association test can fail: descriptive summaries mark undefined values as
//! `None`, and so does the correlation matrix.

use std::{
    collections::BTreeMap,
    panic,
    thread::{self, ScopedJoinHandle},
};

use serde::{Deserialize, Serialize};

use crate::{
    association::{AssociationResult, age_association},
    comparison::{FeatureAnova, FeatureComparison, anova_features, compare_features},
    correlation::CorrelationMatrix,
    dataset::{Cohort, Dataset, Diagnosis, Feature},
    descriptive::{DescriptiveSummary, describe},
    error::{AnalysisError, DegenerateInputError},
};

/// Default significance level of every test.
pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Settings of an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// A test is significant when its p-value is below this level.
    pub significance_level: f64,
    /// Run the sub-analyses concurrently.
    pub parallel: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            significance_level: DEFAULT_SIGNIFICANCE_LEVEL,
            parallel: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleSizes {
    pub total: usize,
    pub benign: usize,
    pub malignant: usize,
}

/// Immutable result of one analysis run.
///
/// Holds no reference to the analyzed dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSnapshot {
    pub descriptive: DescriptiveSummary,
    pub comparisons: BTreeMap<Feature, FeatureComparison>,
    pub anova: BTreeMap<Feature, FeatureAnova>,
    pub association: AssociationResult,
    pub correlations: CorrelationMatrix,
    pub sample_sizes: SampleSizes,
}

/// Analyzes `dataset` with the default options.
///
/// # Examples
///
/// ```
/// use oncostat_analysis::{
///     analyze, interpret,
///     dataset::{Dataset, Diagnosis, PatientRecord},
/// };
///
/// let rows = [
///     ("P0001", 9.0, 0.11, 0.07, 35.0, Diagnosis::Benign),
///     ("P0002", 10.5, 0.10, 0.08, 48.0, Diagnosis::Benign),
///     ("P0003", 11.0, 0.09, 0.06, 62.0, Diagnosis::Benign),
///     ("P0004", 8.5, 0.12, 0.09, 44.0, Diagnosis::Benign),
///     ("P0005", 15.5, 0.08, 0.12, 66.0, Diagnosis::Malignant),
///     ("P0006", 17.0, 0.07, 0.14, 74.0, Diagnosis::Malignant),
///     ("P0007", 14.0, 0.09, 0.11, 38.0, Diagnosis::Malignant),
/// ];
/// let records = rows
///     .into_iter()
///     .map(|(id, size, smooth, compact, age, diagnosis)| PatientRecord {
///         patient_id: id.into(),
///         tumor_size: size,
///         smoothness: smooth,
///         compactness: compact,
///         patient_age: age,
///         diagnosis,
///     })
///     .collect::<Vec<_>>();
///
/// let snapshot = analyze(&Dataset::from_records(&records)).unwrap();
/// assert_eq!(snapshot.sample_sizes.total, 7);
/// assert_eq!(snapshot.sample_sizes.malignant, 3);
///
/// let interpretation = interpret(&snapshot);
/// assert_eq!(interpretation.recommendations.len(), 3);
/// ```
pub fn analyze(dataset: &Dataset) -> Result<AnalysisSnapshot, AnalysisError> {
    analyze_with(dataset, &AnalysisOptions::default())
}

/// Analyzes `dataset` with explicit options.
pub fn analyze_with(
    dataset: &Dataset,
    options: &AnalysisOptions,
) -> Result<AnalysisSnapshot, AnalysisError> {
    let cohort = Cohort::new(dataset)?;
    let alpha = options.significance_level;
    log::debug!(
        "analyzing {} rows (alpha = {alpha}, parallel = {})",
        cohort.len(),
        options.parallel
    );

    let (descriptive, comparisons, anova, association, correlations) = if options.parallel {
        thread::scope(|s| {
            let cohort = &cohort;
            let descriptive = s.spawn(move || describe(cohort));
            let comparisons = s.spawn(move || compare_features(cohort, alpha));
            let anova = s.spawn(move || anova_features(cohort, alpha));
            let association = s.spawn(move || age_association(cohort, alpha));
            let correlations = s.spawn(move || CorrelationMatrix::from_cohort(cohort));
            (
                join(descriptive),
                join(comparisons),
                join(anova),
                join(association),
                join(correlations),
            )
        })
    } else {
        (
            describe(&cohort),
            compare_features(&cohort, alpha),
            anova_features(&cohort, alpha),
            age_association(&cohort, alpha),
            CorrelationMatrix::from_cohort(&cohort),
        )
    };

    let failures = [
        comparisons.as_ref().err(),
        anova.as_ref().err(),
        association.as_ref().err(),
    ];
    log_secondary_failures(&failures);

    Ok(AnalysisSnapshot {
        descriptive,
        comparisons: comparisons?,
        anova: anova?,
        association: association?,
        correlations,
        sample_sizes: SampleSizes {
            total: cohort.len(),
            benign: cohort.group_size(Diagnosis::Benign),
            malignant: cohort.group_size(Diagnosis::Malignant),
        },
    })
}

fn join<T>(handle: ScopedJoinHandle<'_, T>) -> T {
    handle
        .join()
        .unwrap_or_else(|payload| panic::resume_unwind(payload))
}

/// Logs every failure after the first, which is the one reported.
fn log_secondary_failures(failures: &[Option<&DegenerateInputError>]) {
    for err in failures.iter().flatten().skip(1) {
        log::warn!("additional degenerate input: {err}");
    }
}
