//! Play command - tournament against freshly generated codes
//!
//! ## Architecture (4-layer granularity)
//!
//! Level 1: run() - Entry point
//! Level 2: play_tournament() - Build the game and guesser
//! Level 3: Mastermind::play_tournament() - Round loop (tournament crate)
//! Level 4: Output formatting

use anyhow::{Context, Result};
use clap::Args;

use mastermind_core::Distribution;
use mastermind_tournament::{Mastermind, TournamentReport};

use crate::players::{self, GameArgs};

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// Secret code distribution (e.g. InsertColors, TwoColor, FirstLast)
    #[arg(long, default_value = "InsertColors")]
    pub distribution: String,

    /// Rounds to play
    #[arg(long, default_value = "100")]
    pub rounds: usize,

    /// Output JSON instead of text
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Level 1 - Entry Point
// ============================================================================

pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let distribution: Distribution = args
        .distribution
        .parse()
        .with_context(|| format!("Unknown distribution: {}", args.distribution))?;

    tracing::info!(
        "Playing {} rounds of {} ({} pegs, {} colors)",
        args.rounds,
        distribution,
        args.game.board_length,
        args.game.num_colors
    );

    let report = play_tournament(&args.game, distribution, args.rounds, seed)?;

    if args.json {
        players::print_json_report(&report)?;
    } else {
        players::print_text_report(&report);
    }

    Ok(())
}

// ============================================================================
// Level 2 - Tournament
// ============================================================================

pub fn play_tournament(
    game: &GameArgs,
    distribution: Distribution,
    rounds: usize,
    seed: Option<u64>,
) -> Result<TournamentReport> {
    let policy = game.load_policy()?;
    let mut guesser = players::make_player(game.player, policy.as_ref(), seed);
    let mut master = Mastermind::new(game.tournament_config())?;
    let mut rng = players::create_rng(seed);

    let report = master.play_tournament(&mut guesser, distribution, rounds, &mut rng)?;
    Ok(report)
}
