//! Generate command - write a code file for practice tournaments

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use mastermind_core::{write_codes, Alphabet, Distribution};

use crate::players;

#[derive(Args)]
pub struct GenerateArgs {
    /// Secret code distribution
    #[arg(long)]
    pub distribution: String,

    /// Pegs per code
    #[arg(long, default_value = "4")]
    pub board_length: usize,

    /// Colors in the alphabet
    #[arg(long, default_value = "6")]
    pub num_colors: usize,

    /// Number of codes
    #[arg(long, default_value = "100")]
    pub count: usize,

    /// Output directory
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,
}

pub fn run(args: GenerateArgs, seed: Option<u64>) -> Result<()> {
    let distribution: Distribution = args
        .distribution
        .parse()
        .with_context(|| format!("Unknown distribution: {}", args.distribution))?;
    let alphabet = Alphabet::letters(args.num_colors)?;
    let mut rng = players::create_rng(seed);

    let codes = distribution.generate_many(args.board_length, &alphabet, args.count, &mut rng)?;
    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let path = write_codes(
        &args.output,
        distribution.name(),
        &codes,
        &alphabet,
        args.board_length,
    )?;

    tracing::info!("Wrote {} codes to {}", codes.len(), path.display());
    println!("{}", path.display());
    Ok(())
}
