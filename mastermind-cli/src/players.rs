//! Player selection and shared CLI utilities
//!
//! Level 4 - Configuration and utilities

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use mastermind_core::{EndgameAgent, Guesser, LexicographicGuesser, PolicyTable};
use mastermind_tournament::{RoundConfig, TournamentConfig, TournamentReport};

/// Which guesser plays
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    /// Adaptive policy-driven agent
    Endgame,
    /// Lexicographic enumeration
    Baseline,
}

/// Flags shared by every tournament command
#[derive(Args, Clone, Debug)]
pub struct GameArgs {
    /// Pegs per code
    #[arg(long, default_value = "4")]
    pub board_length: usize,

    /// Colors in the alphabet (capital letters from A)
    #[arg(long, default_value = "6")]
    pub num_colors: usize,

    /// Player to run
    #[arg(long, value_enum, default_value = "endgame")]
    pub player: PlayerKind,

    /// Policy table JSON file (endgame player only)
    #[arg(long, value_name = "FILE")]
    pub policy: Option<PathBuf>,

    /// Guesses per round before it is lost
    #[arg(long, default_value = "100")]
    pub guess_cutoff: usize,

    /// Seconds per round
    #[arg(long, default_value = "5")]
    pub round_time: f64,

    /// Seconds per tournament
    #[arg(long, default_value = "300")]
    pub tournament_time: f64,
}

impl GameArgs {
    pub fn tournament_config(&self) -> TournamentConfig {
        let round = RoundConfig::default()
            .with_guess_cutoff(self.guess_cutoff)
            .with_time_cutoff(Duration::from_secs_f64(self.round_time.max(0.0)));
        TournamentConfig::new(self.board_length, self.num_colors)
            .with_round(round)
            .with_time_cutoff(Duration::from_secs_f64(self.tournament_time.max(0.0)))
    }

    /// Load the policy table once, if one was given
    pub fn load_policy(&self) -> Result<Option<PolicyTable>> {
        self.policy.as_deref().map(load_policy).transpose()
    }
}

fn load_policy(path: &Path) -> Result<PolicyTable> {
    PolicyTable::load(path)
        .with_context(|| format!("Failed to load policy table: {}", path.display()))
}

/// Build a fresh guesser
pub fn make_player(kind: PlayerKind, policy: Option<&PolicyTable>, seed: Option<u64>) -> Box<dyn Guesser> {
    match kind {
        PlayerKind::Endgame => {
            let mut agent = EndgameAgent::new();
            if let Some(seed) = seed {
                agent = agent.with_seed(seed);
            }
            if let Some(policy) = policy {
                agent = agent.with_policy(policy.clone());
            }
            Box::new(agent)
        }
        PlayerKind::Baseline => Box::new(LexicographicGuesser::new()),
    }
}

/// Create RNG from seed or random
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Print a tournament report as text
pub fn print_text_report(report: &TournamentReport) {
    let results = &report.results;
    println!("\n=== Tournament Results ===");
    println!("Player:       {}", report.player);
    println!("Distribution: {}", report.distribution);
    println!(
        "Board:        {} pegs, {} colors",
        report.board_length, report.num_colors
    );
    println!(
        "Rounds:       {} of {}",
        results.rounds(),
        report.rounds_requested
    );
    println!(
        "Wins:         {} ({:.1}%)",
        results.wins,
        results.win_rate() * 100.0
    );
    println!("Losses:       {}", results.losses);
    println!("Failures:     {}", results.failures);
    println!("Avg guesses:  {:.2}", results.avg_guesses());
    println!("Score:        {:.3}", results.score);
    println!("Old score:    {}", results.old_score());
    println!("Time:         {:.3}s", report.elapsed_secs);
    if let Some(reason) = report.halted {
        println!("Halted:       {:?}", reason);
    }
}

/// Print a tournament report as JSON
pub fn print_json_report(report: &TournamentReport) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        timestamp: String,
        #[serde(flatten)]
        report: &'a TournamentReport,
        old_score: i64,
        avg_guesses: f64,
    }

    let output = JsonOutput {
        timestamp: chrono::Utc::now().to_rfc3339(),
        report,
        old_score: report.results.old_score(),
        avg_guesses: report.results.avg_guesses(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_player_names() {
        assert_eq!(make_player(PlayerKind::Endgame, None, Some(1)).name(), "Endgame");
        assert_eq!(make_player(PlayerKind::Baseline, None, None).name(), "baseline");
    }

    #[test]
    fn test_load_policy_reports_path() {
        let err = load_policy(Path::new("/nonexistent/policy.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/policy.json"));
    }
}
