//! Contingency tables and the chi-square test of independence.
//!
//! # Examples
//!
//! ```
//! use oncostat_stats::contingency::{ChiSquareTest, ContingencyTable, cramers_v};
//!
//! let table = ContingencyTable::from_counts(vec![
//!     vec![30, 10],
//!     vec![20, 25],
//!     vec![10, 30],
//! ])
//! .unwrap();
//!
//! let test = ChiSquareTest::independence(&table).unwrap();
//! assert_eq!(test.dof, 2);
//! assert!(test.p_value < 0.05);
//!
//! let v = cramers_v(test.statistic, table.total(), table.num_rows(), table.num_columns()).unwrap();
//! assert!(v > 0.0 && v <= 1.0);
//! ```

use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::error::StatsError;

/// A two-way table of observed counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContingencyTable {
    counts: Vec<Vec<u64>>,
}

impl ContingencyTable {
    /// Builds a table from row-major counts.
    ///
    /// Every row must have the same number of columns; an empty table or a
    /// table without columns is rejected.
    pub fn from_counts(counts: Vec<Vec<u64>>) -> Result<Self, StatsError> {
        let columns = counts.first().map_or(0, Vec::len);
        StatsError::require(1, counts.len())?;
        StatsError::require(1, columns)?;
        if let Some(row) = counts.iter().find(|row| row.len() != columns) {
            return Err(StatsError::LengthMismatch {
                left: columns,
                right: row.len(),
            });
        }
        Ok(Self { counts })
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.counts.first().map_or(0, Vec::len)
    }

    /// Observed count at `(row, column)`.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<u64> {
        self.counts.get(row)?.get(column).copied()
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<u64>] {
        &self.counts
    }

    #[must_use]
    pub fn row_totals(&self) -> Vec<u64> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    #[must_use]
    pub fn column_totals(&self) -> Vec<u64> {
        (0..self.num_columns())
            .map(|column| self.counts.iter().map(|row| row[column]).sum())
            .collect()
    }

    /// Grand total of all cells.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Expected counts under independence: `row_total * column_total / total`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn expected(&self) -> Vec<Vec<f64>> {
        let total = self.total() as f64;
        let column_totals = self.column_totals();
        self.row_totals()
            .into_iter()
            .map(|row_total| {
                column_totals
                    .iter()
                    .map(|&column_total| row_total as f64 * column_total as f64 / total)
                    .collect()
            })
            .collect()
    }
}

/// Result of Pearson's chi-square test of independence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChiSquareTest {
    /// The chi-square statistic.
    pub statistic: f64,
    /// Upper-tail p-value of the chi-square distribution.
    pub p_value: f64,
    /// Degrees of freedom, `(rows - 1) * (columns - 1)`.
    pub dof: usize,
    /// Expected counts under independence, same shape as the table.
    pub expected: Vec<Vec<f64>>,
    /// Whether Yates' continuity correction was applied (only for `dof == 1`).
    pub yates_corrected: bool,
}

impl ChiSquareTest {
    /// Tests rows and columns of `table` for independence.
    ///
    /// For a table with one degree of freedom, Yates' continuity correction is
    /// applied: each `|observed - expected|` is shrunk by `min(0.5, |observed - expected|)`.
    ///
    /// Fails when the table has fewer than two rows or columns, or when a row or
    /// column total is zero (expected counts would vanish).
    #[expect(clippy::cast_precision_loss)]
    pub fn independence(table: &ContingencyTable) -> Result<Self, StatsError> {
        let rows = table.num_rows();
        let columns = table.num_columns();
        if rows < 2 || columns < 2 {
            return Err(StatsError::DegenerateTable { rows, columns });
        }
        if table.row_totals().contains(&0) || table.column_totals().contains(&0) {
            return Err(StatsError::EmptyMargin);
        }

        let expected = table.expected();
        let dof = (rows - 1) * (columns - 1);
        let yates_corrected = dof == 1;

        let statistic = table
            .rows()
            .iter()
            .zip(&expected)
            .flat_map(|(observed, expected)| observed.iter().zip(expected))
            .map(|(&observed, &expected)| {
                let mut diff = (observed as f64 - expected).abs();
                if yates_corrected {
                    diff -= diff.min(0.5);
                }
                diff * diff / expected
            })
            .sum::<f64>();

        let dist = ChiSquared::new(dof as f64)
            .map_err(|_| StatsError::InvalidDistribution { name: "chi-square" })?;
        let p_value = dist.sf(statistic);

        Ok(Self {
            statistic,
            p_value,
            dof,
            expected,
            yates_corrected,
        })
    }
}

/// Cramér's V association strength, in `[0, 1]`.
///
/// `V = sqrt(chi2 / (n * (min(rows, columns) - 1)))`. Undefined when the table
/// has a single row or column, or no observations.
#[expect(clippy::cast_precision_loss)]
pub fn cramers_v(
    chi_square: f64,
    total: u64,
    rows: usize,
    columns: usize,
) -> Result<f64, StatsError> {
    let min_dim = rows.min(columns);
    if min_dim < 2 {
        return Err(StatsError::DegenerateTable { rows, columns });
    }
    if total == 0 {
        return Err(StatsError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    let v = (chi_square / (total as f64 * (min_dim - 1) as f64)).sqrt();
    Ok(v.min(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(counts: &[&[u64]]) -> ContingencyTable {
        ContingencyTable::from_counts(counts.iter().map(|row| row.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_margins_sum_to_total() {
        let t = table(&[&[12, 3], &[7, 9], &[4, 15], &[1, 6]]);
        assert_eq!(t.row_totals(), vec![15, 16, 19, 7]);
        assert_eq!(t.column_totals(), vec![24, 33]);
        assert_eq!(t.total(), 57);
        assert_eq!(t.row_totals().iter().sum::<u64>(), t.total());
        assert_eq!(t.column_totals().iter().sum::<u64>(), t.total());
    }

    #[test]
    fn test_expected_preserves_margins() {
        let t = table(&[&[12, 3], &[7, 9], &[4, 15]]);
        let expected = t.expected();
        for (row, row_total) in expected.iter().zip(t.row_totals()) {
            assert!((row.iter().sum::<f64>() - row_total as f64).abs() < 1e-9);
        }
        assert!((expected[0][0] - 15.0 * 23.0 / 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_reference_statistic_without_correction() {
        // expected counts are all 10, so chi2 = (25 + 25 + 25 + 25 + 0 + 0) / 10
        let t = table(&[&[15, 5], &[5, 15], &[10, 10]]);
        let test = ChiSquareTest::independence(&t).unwrap();
        assert!(!test.yates_corrected);
        assert_eq!(test.dof, 2);
        assert!((test.statistic - 10.0).abs() < 1e-12);
        // chi2(2) upper tail is exp(-x / 2)
        assert!((test.p_value - (-5.0_f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn test_yates_correction_for_two_by_two() {
        // expected 10 everywhere, |O - E| = 5 shrinks to 4.5
        let t = table(&[&[15, 5], &[5, 15]]);
        let test = ChiSquareTest::independence(&t).unwrap();
        assert!(test.yates_corrected);
        assert_eq!(test.dof, 1);
        assert!((test.statistic - 4.0 * 4.5 * 4.5 / 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_independent_table_has_zero_statistic() {
        let t = table(&[&[10, 20], &[5, 10], &[2, 4]]);
        let test = ChiSquareTest::independence(&t).unwrap();
        assert!(test.statistic.abs() < 1e-12);
        assert!((test.p_value - 1.0).abs() < 1e-9);
        let v = cramers_v(test.statistic, t.total(), 3, 2).unwrap();
        assert!(v.abs() < 1e-6);
    }

    #[test]
    fn test_cramers_v_bounds() {
        let tables = [
            table(&[&[20, 0], &[0, 20]]),
            table(&[&[20, 1], &[2, 30], &[7, 7]]),
            table(&[&[3, 4], &[5, 6], &[7, 8], &[9, 10]]),
        ];
        for t in &tables {
            let test = ChiSquareTest::independence(t).unwrap();
            let v = cramers_v(test.statistic, t.total(), t.num_rows(), t.num_columns()).unwrap();
            assert!((0.0..=1.0).contains(&v), "V = {v} out of range");
        }
    }

    #[test]
    fn test_perfect_association_without_correction() {
        let t = table(&[&[20, 0, 0], &[0, 20, 0], &[0, 0, 20]]);
        let test = ChiSquareTest::independence(&t).unwrap();
        let v = cramers_v(test.statistic, t.total(), 3, 3).unwrap();
        assert!((v - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_tables() {
        let single_row = table(&[&[10, 12]]);
        assert_eq!(
            ChiSquareTest::independence(&single_row),
            Err(StatsError::DegenerateTable {
                rows: 1,
                columns: 2
            })
        );
        assert!(cramers_v(1.0, 22, 1, 2).is_err());

        let empty_column = table(&[&[10, 0], &[4, 0]]);
        assert_eq!(
            ChiSquareTest::independence(&empty_column),
            Err(StatsError::EmptyMargin)
        );

        assert!(ContingencyTable::from_counts(vec![vec![1, 2], vec![3]]).is_err());
        assert!(ContingencyTable::from_counts(vec![]).is_err());
    }
}
