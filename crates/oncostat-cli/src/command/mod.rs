use clap::{Parser, Subcommand};

use self::{analyze::AnalyzeArg, generate::GenerateArg};

mod analyze;
mod generate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Run hypothesis tests and effect-size analysis on a dataset
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// Generate a synthetic tumor diagnosis dataset
    Generate(#[clap(flatten)] GenerateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Analyze(arg) => analyze::run(&arg)?,
        Mode::Generate(arg) => generate::run(&arg)?,
    }
    Ok(())
}
