//! Mastermind Tournament - Rounds, scoring and tournaments
//!
//! This crate drives guessers through the game:
//! - Rounds with guess and wall-clock budgets
//! - Tournament scoring (wins weighted by guess count, failure penalty)
//! - Generated and practice (code file) tournaments
//! - Sweeps of independent tournaments, optionally in parallel
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_sweep (orchestration)
//! - Level 2: Mastermind::play_tournament, practice_tournament (phases)
//! - Level 3: Round::play, respond_to_guess (steps)
//! - Level 4: results, configuration

mod config;
mod results;
mod round;
mod sweep;
mod tournament;

pub use config::{RoundConfig, SweepConfig, TournamentConfig};
pub use results::Results;
pub use round::{Outcome, Response, Round, RoundResult};
pub use sweep::{run_sweep, run_sweep_with, SweepEntry};
pub use tournament::{HaltReason, Mastermind, TournamentReport};
