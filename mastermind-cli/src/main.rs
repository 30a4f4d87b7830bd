//! Mastermind CLI - Command-line interface
//!
//! Commands:
//! - play: Run a tournament against generated codes
//! - practice: Run a tournament against a code file
//! - generate: Write a code file from a distribution
//! - sweep: One tournament per distribution, optionally in parallel

mod generate;
mod play;
mod players;
mod practice;
mod sweep;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mastermind")]
#[command(about = "Mastermind code-breaking engine and tournament harness")]
struct Cli {
    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a tournament against generated codes
    Play(play::PlayArgs),
    /// Play a tournament against codes read from a file
    Practice(practice::PracticeArgs),
    /// Generate a code file
    Generate(generate::GenerateArgs),
    /// Play one tournament per distribution
    Sweep(sweep::SweepArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args, cli.seed),
        Commands::Practice(args) => practice::run(args),
        Commands::Generate(args) => generate::run(args, cli.seed),
        Commands::Sweep(args) => sweep::run(args, cli.seed),
    }
}
