//! Hypothesis testing and effect-size analysis of tumor diagnosis data
//!
//! This crate compares benign and malignant tumors across a fixed set of
//! numeric features and summarizes the results into an immutable snapshot
//! and a rule-based textual interpretation.
//!
//! # Overview
//!
//! 1. **Load Data** ([`dataset::Dataset`]): Build a table from typed
//!    [`dataset::PatientRecord`]s or loosely typed JSON rows
//! 2. **Validate** ([`dataset::Cohort`]): Check labels, column types and group sizes
//! 3. **Analyze** ([`analyze`]): Run every sub-analysis and collect an
//!    [`AnalysisSnapshot`]
//!    - [`descriptive`]: Overall and per-group summaries with skewness and kurtosis
//!    - [`comparison`]: t-tests, Cohen's d and one-way ANOVA per feature
//!    - [`association`]: Chi-square test of age group against diagnosis
//!    - [`correlation`]: Pearson correlation matrix
//! 4. **Interpret** ([`interpret`]): Derive findings and recommendations
//!
//! Invalid datasets are rejected with a [`SchemaError`]. Statistics that are
//! undefined for the data, such as a t-test on a constant feature, make the
//! whole analysis fail with a [`DegenerateInputError`].
//!
//! # Examples
//!
//! ```no_run
//! use oncostat_analysis::{analyze, dataset::{Dataset, Row}, interpret};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! // In practice, load rows from a JSON file
//! let rows: Vec<Row> = serde_json::from_str("[]")?;
//! let dataset = Dataset::from_rows(&rows);
//!
//! let snapshot = analyze(&dataset)?;
//! for (feature, comparison) in &snapshot.comparisons {
//!     println!("{feature}: p = {:.4}, d = {:.3}", comparison.p_value, comparison.cohens_d);
//! }
//!
//! for finding in interpret(&snapshot).significant_differences {
//!     println!("{finding}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod association;
pub mod comparison;
pub mod correlation;
pub mod dataset;
pub mod descriptive;
pub mod error;
pub mod interpretation;
pub mod snapshot;

pub use self::{
    error::{AnalysisError, DegenerateInputError, SchemaError},
    interpretation::{InterpretationResult, interpret},
    snapshot::{AnalysisOptions, AnalysisSnapshot, analyze, analyze_with},
};
