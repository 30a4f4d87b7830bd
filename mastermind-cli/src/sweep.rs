//! Sweep command - one tournament per distribution
//!
//! ## Architecture (4-layer granularity)
//!
//! Level 1: run() - Entry point
//! Level 2: run_sweep_with() - Parallel tournaments (tournament crate)
//! Level 3: Progress reporting
//! Level 4: Output formatting

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use mastermind_core::Distribution;
use mastermind_tournament::{run_sweep_with, SweepConfig, SweepEntry};

use crate::players::{self, GameArgs};

#[derive(Args)]
pub struct SweepArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// Distributions to play (default: all)
    #[arg(long, value_delimiter = ',')]
    pub distributions: Vec<String>,

    /// Rounds per tournament
    #[arg(long, default_value = "100")]
    pub rounds: usize,

    /// Run tournaments on the rayon thread pool
    #[arg(long)]
    pub parallel: bool,

    /// Output JSON instead of text
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Level 1 - Entry Point
// ============================================================================

pub fn run(args: SweepArgs, seed: Option<u64>) -> Result<()> {
    let distributions = parse_distributions(&args.distributions)?;
    let config = args.game.tournament_config();
    let mut sweep = SweepConfig::new(args.rounds).with_seed(seed.unwrap_or(0));
    if !args.parallel {
        sweep = sweep.sequential();
    }
    let policy = args.game.load_policy()?;
    let player = args.game.player;

    tracing::info!(
        "Sweeping {} distributions, {} rounds each ({} pegs, {} colors)",
        distributions.len(),
        args.rounds,
        config.board_length,
        config.num_colors
    );

    // ========================================================================
    // Level 2-3 - Tournaments with progress
    // ========================================================================

    let progress = ProgressBar::new(distributions.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>3}/{len:3} {msg}")
            .context("Invalid progress template")?
            .progress_chars("=>-"),
    );

    let entries = run_sweep_with(
        &distributions,
        &config,
        &sweep,
        || players::make_player(player, policy.as_ref(), seed),
        |entry| {
            progress.set_message(entry.distribution.to_string());
            progress.inc(1);
        },
    );
    progress.finish_and_clear();

    if args.json {
        print_json_results(&entries)?;
    } else {
        print_text_results(&entries);
    }
    Ok(())
}

fn parse_distributions(names: &[String]) -> Result<Vec<Distribution>> {
    if names.is_empty() {
        return Ok(Distribution::ALL.to_vec());
    }
    names
        .iter()
        .map(|name| {
            name.trim()
                .parse()
                .with_context(|| format!("Unknown distribution: {}", name))
        })
        .collect()
}

// ============================================================================
// Level 4 - Output
// ============================================================================

fn print_text_results(entries: &[SweepEntry]) {
    println!("\n=== Sweep Results ===");
    println!(
        "{:<22} {:>6} {:>6} {:>6} {:>8} {:>10}",
        "Distribution", "Wins", "Losses", "Fails", "AvgG", "Score"
    );
    let mut total = 0.0;
    for entry in entries {
        match &entry.report {
            Ok(report) => {
                let r = &report.results;
                total += r.score;
                println!(
                    "{:<22} {:>6} {:>6} {:>6} {:>8.2} {:>10.2}",
                    entry.distribution,
                    r.wins,
                    r.losses,
                    r.failures,
                    r.avg_guesses(),
                    r.score
                );
            }
            Err(e) => println!("{:<22} skipped: {}", entry.distribution, e),
        }
    }
    println!("\nTotal score: {:.2}", total);
}

fn print_json_results(entries: &[SweepEntry]) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonEntry<'a> {
        distribution: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        report: Option<&'a mastermind_tournament::TournamentReport>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        timestamp: String,
        total_score: f64,
        tournaments: Vec<JsonEntry<'a>>,
    }

    let tournaments: Vec<JsonEntry> = entries
        .iter()
        .map(|entry| JsonEntry {
            distribution: entry.distribution.to_string(),
            report: entry.report.as_ref().ok(),
            error: entry.report.as_ref().err().map(|e| e.to_string()),
        })
        .collect();
    let total_score: f64 = tournaments
        .iter()
        .filter_map(|t| t.report)
        .map(|r| r.results.score)
        .sum();

    let output = JsonOutput {
        timestamp: chrono::Utc::now().to_rfc3339(),
        total_score,
        tournaments,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
