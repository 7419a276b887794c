//! Per-feature summaries of the whole cohort and of each diagnosis group.

use std::collections::BTreeMap;

use oncostat_stats::{descriptive::DescriptiveStats, moments};
use serde::Serialize;

use crate::dataset::{Cohort, Diagnosis, Feature};

/// Summary of every feature. `None` when a feature has no value in the group.
pub type SummaryTable = BTreeMap<Feature, Option<DescriptiveStats>>;

/// Distribution shape of a feature over the whole cohort.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureShape {
    /// Adjusted Fisher-Pearson skewness, `None` when undefined.
    pub skewness: Option<f64>,
    /// Excess kurtosis, `None` when undefined.
    pub kurtosis: Option<f64>,
}

impl FeatureShape {
    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            skewness: moments::skewness(values),
            kurtosis: moments::excess_kurtosis(values),
        }
    }

    /// Whether either shape statistic is undefined.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.skewness.is_none() || self.kurtosis.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveSummary {
    pub overall: SummaryTable,
    pub benign: SummaryTable,
    pub malignant: SummaryTable,
    pub shape: BTreeMap<Feature, FeatureShape>,
}

impl DescriptiveSummary {
    #[must_use]
    pub fn group(&self, diagnosis: Diagnosis) -> &SummaryTable {
        match diagnosis {
            Diagnosis::Benign => &self.benign,
            Diagnosis::Malignant => &self.malignant,
        }
    }
}

/// Computes overall and per-group summaries and the overall shape of every feature.
#[must_use]
pub fn describe(cohort: &Cohort<'_>) -> DescriptiveSummary {
    let mut summary = DescriptiveSummary {
        overall: SummaryTable::new(),
        benign: SummaryTable::new(),
        malignant: SummaryTable::new(),
        shape: BTreeMap::new(),
    };

    for feature in Feature::ALL {
        let values = cohort.values(feature);
        summary
            .shape
            .insert(feature, FeatureShape::from_values(&values));
        summary
            .overall
            .insert(feature, DescriptiveStats::new(values));
        summary.benign.insert(
            feature,
            DescriptiveStats::new(cohort.group_values(feature, Diagnosis::Benign)),
        );
        summary.malignant.insert(
            feature,
            DescriptiveStats::new(cohort.group_values(feature, Diagnosis::Malignant)),
        );
    }

    log::debug!("described {} features over {} rows", Feature::COUNT, cohort.len());
    summary
}
