use std::path::PathBuf;

use oncostat_analysis::dataset::Diagnosis;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{
    synthetic::{CohortGenerator, DEFAULT_MALIGNANT_FRACTION},
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Number of patients to generate
    #[arg(long, default_value_t = 1000)]
    num_samples: usize,
    /// Random seed; a random one is chosen and reported when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Probability of a patient having a malignant tumor
    #[arg(long, default_value_t = DEFAULT_MALIGNANT_FRACTION)]
    malignant_fraction: f64,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let generator = CohortGenerator::new(arg.malignant_fraction)?;
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = Pcg32::seed_from_u64(seed);
    log::debug!(
        "generator: seed={seed}, malignant_fraction={}",
        arg.malignant_fraction
    );

    eprintln!(
        "Generating {} patients (seed = {seed})...",
        arg.num_samples
    );
    let records = generator.generate(&mut rng, arg.num_samples);

    let malignant = records
        .iter()
        .filter(|r| r.diagnosis == Diagnosis::Malignant)
        .count();
    eprintln!(
        "Generated {} patients: {} benign, {malignant} malignant",
        records.len(),
        records.len() - malignant,
    );

    let mut output = Output::from_output_path(arg.output.clone())?;
    output.write_json(&records)?;
    eprintln!("Dataset written to {}", output.display_path());

    Ok(())
}
