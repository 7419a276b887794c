use std::path::PathBuf;

use chrono::{DateTime, Utc};
use oncostat_analysis::{AnalysisOptions, AnalysisSnapshot, InterpretationResult};
use serde::Serialize;

/// JSON report written by the `analyze` command.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport<'a> {
    pub generated_at: DateTime<Utc>,
    /// Path of the analyzed dataset file
    pub dataset: PathBuf,
    pub options: AnalysisOptions,
    pub snapshot: &'a AnalysisSnapshot,
    pub interpretation: Option<&'a InterpretationResult>,
}
