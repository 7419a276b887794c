use oncostat_stats::correlation::pearson;
use serde::Serialize;

use crate::dataset::{Cohort, Feature};

/// Symmetric matrix of pairwise Pearson correlations between the features.
///
/// Each pair uses the rows where both features are present. A cell is `None`
/// when the correlation is undefined (a constant feature, or fewer than two
/// complete rows); it is never reported as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub features: [Feature; Feature::COUNT],
    pub values: [[Option<f64>; Feature::COUNT]; Feature::COUNT],
}

impl CorrelationMatrix {
    /// Computes the matrix over all features of the cohort.
    #[must_use]
    pub fn from_cohort(cohort: &Cohort<'_>) -> Self {
        let mut values = [[None; Feature::COUNT]; Feature::COUNT];
        for (i, x) in Feature::ALL.into_iter().enumerate() {
            for (j, y) in Feature::ALL.into_iter().enumerate().skip(i) {
                let (xs, ys) = cohort.paired_values(x, y);
                let r = match pearson(&xs, &ys) {
                    // the diagonal is exactly one whenever it is defined
                    Ok(_) if i == j => Some(1.0),
                    Ok(r) => Some(r),
                    Err(err) => {
                        log::debug!("correlation of {x} and {y} is undefined: {err}");
                        None
                    }
                };
                values[i][j] = r;
                values[j][i] = r;
            }
        }
        Self {
            features: Feature::ALL,
            values,
        }
    }

    #[must_use]
    pub fn get(&self, x: Feature, y: Feature) -> Option<f64> {
        self.values[x.index()][y.index()]
    }
}
