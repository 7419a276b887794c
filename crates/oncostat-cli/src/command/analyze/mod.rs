//! Hypothesis testing command
//!
//! Reads a dataset, runs the full analysis, prints a text report and
//! optionally saves the snapshot as a JSON report.

mod table;

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Args;
use oncostat_analysis::{
    AnalysisOptions, analyze_with, interpret, snapshot::DEFAULT_SIGNIFICANCE_LEVEL,
};

use crate::{
    schema::report::AnalysisReport,
    util::{self, Output},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct AnalyzeArg {
    /// Path to the dataset JSON file (an array of row objects)
    pub dataset: PathBuf,

    /// Save the analysis snapshot as a JSON report to this path
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Significance level of every test
    #[arg(long, default_value_t = DEFAULT_SIGNIFICANCE_LEVEL)]
    pub alpha: f64,

    /// Run the sub-analyses one after another instead of concurrently
    #[arg(long)]
    pub sequential: bool,

    /// Skip the textual interpretation
    #[arg(long)]
    pub no_interpretation: bool,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    if !(arg.alpha > 0.0 && arg.alpha < 1.0) {
        anyhow::bail!("Significance level must be within (0, 1), got {}", arg.alpha);
    }
    let options = AnalysisOptions {
        significance_level: arg.alpha,
        parallel: !arg.sequential,
    };
    log::debug!("analysis options: {options:?}");

    eprintln!("Reading dataset from {}...", arg.dataset.display());
    let dataset = util::read_dataset_file(&arg.dataset)?;
    eprintln!("Read {} rows", dataset.num_rows());

    eprintln!("Running analysis...");
    let snapshot = analyze_with(&dataset, &options)
        .with_context(|| format!("Failed to analyze dataset: {}", arg.dataset.display()))?;
    eprintln!("Analyzed {} rows", snapshot.sample_sizes.total);
    let interpretation = (!arg.no_interpretation).then(|| interpret(&snapshot));

    println!("Hypothesis Testing Report ({})", arg.dataset.display());
    println!("==========================================\n");

    table::print_sample_sizes(&snapshot.sample_sizes);
    println!();
    table::print_descriptive(&snapshot.descriptive);
    table::print_comparisons(&snapshot.comparisons, options.significance_level);
    println!();
    table::print_anova(&snapshot.anova);
    println!();
    table::print_association(&snapshot.association);
    println!();
    table::print_correlations(&snapshot.correlations);

    if let Some(interpretation) = &interpretation {
        println!();
        table::print_interpretation(interpretation);
    }

    if let Some(output_path) = &arg.output {
        let report = AnalysisReport {
            generated_at: Utc::now(),
            dataset: arg.dataset.clone(),
            options,
            snapshot: &snapshot,
            interpretation: interpretation.as_ref(),
        };
        Output::save_json(&report, Some(output_path.clone()))?;
        eprintln!("\nReport saved to: {}", output_path.display());
    }

    Ok(())
}
