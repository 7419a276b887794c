//! Association between patient age and diagnosis
//!
//! Ages are binned into ordinal [`AgeGroup`]s, cross-tabulated against the
//! diagnosis, and tested for independence with a chi-square test. The age
//! groups are a derived column local to this computation; the dataset is
//! never modified.
//!
//! | Group       | Ages       |
//! |-------------|------------|
//! | Young       | (0, 40]    |
//! | Middle-aged | (40, 55]   |
//! | Older       | (55, 70]   |
//! | Elderly     | (70, 100]  |
//!
//! Rows whose age is missing or outside `(0, 100]` take no part in the test
//! and are reported as excluded.

use std::sync::LazyLock;

use oncostat_stats::{
    binning::IntervalBins,
    contingency::{ChiSquareTest, ContingencyTable, cramers_v},
};
use serde::Serialize;

use crate::{
    dataset::{Cohort, Diagnosis, Feature},
    error::{DegenerateInputError, TestKind},
};

/// Subject of the association test in error messages.
pub const ASSOCIATION_SUBJECT: &str = "Age_Group × Diagnosis";

static AGE_BINS: LazyLock<IntervalBins> = LazyLock::new(|| {
    IntervalBins::new(vec![0.0, 40.0, 55.0, 70.0, 100.0])
        .expect("age group edges are finite and strictly increasing")
});

/// Ordinal age bracket.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display, Serialize,
)]
pub enum AgeGroup {
    Young,
    #[display("Middle-aged")]
    #[serde(rename = "Middle-aged")]
    MiddleAged,
    Older,
    Elderly,
}

impl AgeGroup {
    pub const ALL: [Self; 4] = [Self::Young, Self::MiddleAged, Self::Older, Self::Elderly];

    /// Bracket of an age, `None` outside `(0, 100]`.
    ///
    /// ```
    /// # use oncostat_analysis::association::AgeGroup;
    /// assert_eq!(AgeGroup::from_age(40.0), Some(AgeGroup::Young));
    /// assert_eq!(AgeGroup::from_age(41.0), Some(AgeGroup::MiddleAged));
    /// assert_eq!(AgeGroup::from_age(120.0), None);
    /// ```
    #[must_use]
    pub fn from_age(age: f64) -> Option<Self> {
        AGE_BINS.bin_of(age).map(|index| Self::ALL[index])
    }

    /// The `(lower, upper]` age bounds of the group.
    #[must_use]
    pub fn bounds(self) -> (f64, f64) {
        AGE_BINS.bounds(self as usize).unwrap_or((f64::NAN, f64::NAN))
    }
}

/// Derives the age group of every row. The input is left untouched.
#[must_use]
pub fn age_groups(ages: &[Option<f64>]) -> Vec<Option<AgeGroup>> {
    ages.iter()
        .map(|age| age.and_then(AgeGroup::from_age))
        .collect()
}

/// Observed counts of one age group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContingencyRow {
    pub age_group: AgeGroup,
    pub benign: u64,
    pub malignant: u64,
}

/// Expected counts of one age group under independence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpectedRow {
    pub age_group: AgeGroup,
    pub benign: f64,
    pub malignant: f64,
}

/// Chi-square test of independence between age group and diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationResult {
    pub chi_square: f64,
    pub p_value: f64,
    pub dof: usize,
    /// Association strength in `[0, 1]`.
    pub cramers_v: f64,
    pub significant: bool,
    /// Whether Yates' continuity correction was applied.
    pub yates_corrected: bool,
    /// Observed counts, one row per age group present, in ordinal order.
    pub contingency: Vec<ContingencyRow>,
    pub expected: Vec<ExpectedRow>,
    /// Rows left out because their age is missing or outside every group.
    pub excluded_rows: usize,
}

impl AssociationResult {
    /// Number of rows that took part in the test.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.contingency
            .iter()
            .map(|row| row.benign + row.malignant)
            .sum()
    }
}

/// Tests whether the age distribution differs between diagnosis groups.
pub fn age_association(
    cohort: &Cohort<'_>,
    significance_level: f64,
) -> Result<AssociationResult, DegenerateInputError> {
    let groups = age_groups(cohort.column(Feature::PatientAge));

    let mut counts = [[0_u64; 2]; AgeGroup::ALL.len()];
    let mut excluded_rows = 0;
    for (group, diagnosis) in groups.iter().zip(cohort.diagnoses()) {
        let Some(group) = group else {
            excluded_rows += 1;
            continue;
        };
        let column = match diagnosis {
            Diagnosis::Benign => 0,
            Diagnosis::Malignant => 1,
        };
        counts[*group as usize][column] += 1;
    }
    if excluded_rows > 0 {
        log::debug!("excluded {excluded_rows} rows without a valid age from the association test");
    }

    let present = AgeGroup::ALL
        .into_iter()
        .zip(counts)
        .filter(|(_, [benign, malignant])| benign + malignant > 0)
        .collect::<Vec<_>>();

    let degenerate =
        |test| move |source| DegenerateInputError::new(test, ASSOCIATION_SUBJECT, source);
    let table =
        ContingencyTable::from_counts(present.iter().map(|(_, row)| row.to_vec()).collect())
            .map_err(degenerate(TestKind::ChiSquare))?;
    let test = ChiSquareTest::independence(&table).map_err(degenerate(TestKind::ChiSquare))?;
    let cramers_v = cramers_v(
        test.statistic,
        table.total(),
        table.num_rows(),
        table.num_columns(),
    )
    .map_err(degenerate(TestKind::CramersV))?;

    let contingency = present
        .iter()
        .map(|&(age_group, [benign, malignant])| ContingencyRow {
            age_group,
            benign,
            malignant,
        })
        .collect();
    let expected = present
        .iter()
        .zip(&test.expected)
        .map(|(&(age_group, _), row)| ExpectedRow {
            age_group,
            benign: row[0],
            malignant: row[1],
        })
        .collect();

    log::debug!(
        "chi-square test over {} age groups: statistic {:.4}, p {:.4}",
        table.num_rows(),
        test.statistic,
        test.p_value
    );

    Ok(AssociationResult {
        chi_square: test.statistic,
        p_value: test.p_value,
        dof: test.dof,
        cramers_v,
        significant: test.p_value < significance_level,
        yates_corrected: test.yates_corrected,
        contingency,
        expected,
        excluded_rows,
    })
}
