use oncostat_stats::error::StatsError;

use crate::dataset::{ColumnKind, Diagnosis};

/// Error returned by [`analyze`](crate::analyze).
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AnalysisError {
    #[display("invalid dataset: {_0}")]
    Schema(SchemaError),
    #[display("{_0}")]
    Degenerate(DegenerateInputError),
}

/// The dataset does not satisfy the schema the engine relies on.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SchemaError {
    #[display("missing required column '{column}'")]
    MissingColumn { column: String },
    #[display("column '{column}' must be {expected}, found {found}")]
    WrongColumnType {
        column: String,
        expected: ColumnKind,
        found: ColumnKind,
    },
    #[display("column '{column}' has {actual} rows, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[display("row {row} has no diagnosis")]
    MissingLabel { row: usize },
    #[display("row {row} has unknown diagnosis '{label}'")]
    UnknownLabel { row: usize, label: String },
    #[display("no rows with diagnosis {diagnosis}")]
    EmptyGroup { diagnosis: Diagnosis },
    #[display("column '{column}' has a non-finite value at row {row}")]
    NonFiniteValue { column: String, row: usize },
}

/// Statistical test that failed on degenerate input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum TestKind {
    #[display("t-test")]
    TTest,
    #[display("Welch t-test")]
    WelchTTest,
    #[display("Cohen's d")]
    CohensD,
    #[display("one-way ANOVA")]
    Anova,
    #[display("chi-square test")]
    ChiSquare,
    #[display("Cramér's V")]
    CramersV,
}

/// A statistic is undefined for the given data, e.g. a feature without variance.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
#[display("{test} is undefined for {subject}: {source}")]
pub struct DegenerateInputError {
    pub test: TestKind,
    /// Feature name, or the pair of variables of an association test.
    pub subject: String,
    pub source: StatsError,
}

impl DegenerateInputError {
    pub(crate) fn new(test: TestKind, subject: impl Into<String>, source: StatsError) -> Self {
        Self {
            test,
            subject: subject.into(),
            source,
        }
    }
}
