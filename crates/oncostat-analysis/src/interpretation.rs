//! Rule-based reading of an analysis snapshot
//!
//! The findings are derived with fixed thresholds and are fully determined by
//! the snapshot. Features are visited in declaration order.
//!
//! | Rule                          | Finding                                         |
//! |-------------------------------|-------------------------------------------------|
//! | significant t-test            | direction of the malignant mean, with p-value   |
//! | significant t-test            | effect size category of Cohen's d               |
//! | significant association test  | age distribution differs, with p-value          |
//!
//! Three general recommendations are always appended.

use serde::Serialize;

use crate::snapshot::AnalysisSnapshot;

/// General recommendations appended to every interpretation.
pub const RECOMMENDATIONS: [&str; 3] = [
    "Features with significant differences could be important for diagnosis",
    "Large effect sizes indicate clinically meaningful differences",
    "Consider these findings for feature selection in predictive modeling",
];

/// Conventional magnitude categories of Cohen's d.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, derive_more::Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectSizeCategory {
    #[display("small")]
    Small,
    #[display("medium")]
    Medium,
    #[display("large")]
    Large,
}

impl EffectSizeCategory {
    /// Categorizes `|d|`: below 0.2 small, below 0.8 medium, otherwise large.
    ///
    /// ```
    /// # use oncostat_analysis::interpretation::EffectSizeCategory;
    /// assert_eq!(EffectSizeCategory::from_cohens_d(-0.1), EffectSizeCategory::Small);
    /// assert_eq!(EffectSizeCategory::from_cohens_d(0.5), EffectSizeCategory::Medium);
    /// assert_eq!(EffectSizeCategory::from_cohens_d(-1.0), EffectSizeCategory::Large);
    /// ```
    #[must_use]
    pub fn from_cohens_d(d: f64) -> Self {
        let magnitude = d.abs();
        if magnitude < 0.2 {
            Self::Small
        } else if magnitude < 0.8 {
            Self::Medium
        } else {
            Self::Large
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterpretationResult {
    pub significant_differences: Vec<String>,
    pub effect_sizes: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Derives the textual findings of a snapshot.
#[must_use]
pub fn interpret(snapshot: &AnalysisSnapshot) -> InterpretationResult {
    let mut result = InterpretationResult::default();

    for (feature, comparison) in &snapshot.comparisons {
        if !comparison.significant {
            continue;
        }
        let direction = if comparison.malignant_higher() {
            "higher"
        } else {
            "lower"
        };
        result.significant_differences.push(format!(
            "{feature}: Malignant tumors have significantly {direction} values (p = {:.4})",
            comparison.p_value
        ));
        result.effect_sizes.push(format!(
            "{feature}: {} effect size (Cohen's d = {:.3})",
            EffectSizeCategory::from_cohens_d(comparison.cohens_d),
            comparison.cohens_d
        ));
    }

    let association = &snapshot.association;
    if association.significant {
        result.significant_differences.push(format!(
            "Age distribution differs significantly between diagnosis groups (p = {:.4})",
            association.p_value
        ));
    }

    result.recommendations = RECOMMENDATIONS.iter().map(ToString::to_string).collect();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analyze,
        dataset::{Dataset, Feature},
        snapshot::tests::seeded_records,
    };

    #[test]
    fn test_effect_size_thresholds() {
        assert_eq!(EffectSizeCategory::from_cohens_d(0.0), EffectSizeCategory::Small);
        assert_eq!(EffectSizeCategory::from_cohens_d(0.19), EffectSizeCategory::Small);
        assert_eq!(EffectSizeCategory::from_cohens_d(0.2), EffectSizeCategory::Medium);
        assert_eq!(EffectSizeCategory::from_cohens_d(-0.79), EffectSizeCategory::Medium);
        assert_eq!(EffectSizeCategory::from_cohens_d(0.8), EffectSizeCategory::Large);
        assert_eq!(EffectSizeCategory::from_cohens_d(-1.0), EffectSizeCategory::Large);
    }

    #[test]
    fn test_malignant_higher_finding() {
        let snapshot = analyze(&Dataset::from_records(&seeded_records(42))).unwrap();
        let result = interpret(&snapshot);

        let size = &snapshot.comparisons[&Feature::TumorSize];
        assert_eq!(
            result.significant_differences[0],
            format!(
                "Tumor_Size: Malignant tumors have significantly higher values (p = {:.4})",
                size.p_value
            )
        );
        assert_eq!(
            result.effect_sizes[0],
            format!("Tumor_Size: large effect size (Cohen's d = {:.3})", size.cohens_d)
        );
    }

    #[test]
    fn test_only_significant_features_are_reported() {
        let mut snapshot = analyze(&Dataset::from_records(&seeded_records(42))).unwrap();
        for comparison in snapshot.comparisons.values_mut() {
            comparison.significant = false;
        }
        snapshot.association.significant = false;

        let result = interpret(&snapshot);
        assert!(result.significant_differences.is_empty());
        assert!(result.effect_sizes.is_empty());
        assert_eq!(result.recommendations, RECOMMENDATIONS);
    }

    #[test]
    fn test_association_finding() {
        let mut snapshot = analyze(&Dataset::from_records(&seeded_records(42))).unwrap();
        for comparison in snapshot.comparisons.values_mut() {
            comparison.significant = false;
        }
        snapshot.association.significant = true;
        snapshot.association.p_value = 0.0123;

        let result = interpret(&snapshot);
        assert_eq!(
            result.significant_differences,
            vec!["Age distribution differs significantly between diagnosis groups (p = 0.0123)"]
        );
    }

    #[test]
    fn test_lower_direction_and_feature_order() {
        let mut snapshot = analyze(&Dataset::from_records(&seeded_records(42))).unwrap();
        snapshot.association.significant = false;
        for comparison in snapshot.comparisons.values_mut() {
            comparison.significant = true;
        }
        let smoothness = snapshot
            .comparisons
            .get_mut(&Feature::Smoothness)
            .unwrap();
        smoothness.benign.mean = 0.10;
        smoothness.malignant.mean = 0.08;
        smoothness.p_value = 0.001;

        let result = interpret(&snapshot);
        assert_eq!(result.significant_differences.len(), Feature::COUNT);
        for (finding, feature) in result.significant_differences.iter().zip(Feature::ALL) {
            assert!(finding.starts_with(feature.name()));
        }
        assert_eq!(
            result.significant_differences[1],
            "Smoothness: Malignant tumors have significantly lower values (p = 0.0010)"
        );
    }

    #[test]
    fn test_interpret_is_deterministic() {
        let snapshot = analyze(&Dataset::from_records(&seeded_records(9))).unwrap();
        assert_eq!(interpret(&snapshot), interpret(&snapshot));
        assert_eq!(interpret(&snapshot.clone()), interpret(&snapshot));
    }
}
