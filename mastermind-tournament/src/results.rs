//! Tournament results and scoring
//!
//! Level 4 - Utilities

use serde::Serialize;
use std::fmt;

use crate::round::{Outcome, RoundResult};

/// Win, loss and failure counts plus the real-valued score
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Results {
    pub wins: usize,
    pub losses: usize,
    pub failures: usize,
    pub score: f64,
    /// Guesses spent across winning rounds
    pub win_guesses: usize,
}

impl Results {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished round and apply its score
    ///
    /// A win earns `board_length * num_colors * 5 / sqrt(guesses)`; a
    /// failure costs `2 * board_length * num_colors`.
    pub fn record(&mut self, round: &RoundResult, board_length: usize, num_colors: usize) {
        let weight = (board_length * num_colors) as f64;
        match round.outcome {
            Outcome::Win => {
                self.wins += 1;
                self.win_guesses += round.guesses;
                self.score += weight * 5.0 / (round.guesses.max(1) as f64).sqrt();
            }
            Outcome::Loss => self.losses += 1,
            Outcome::Failure => {
                self.failures += 1;
                self.score -= 2.0 * weight;
            }
            Outcome::Valid => {}
        }
    }

    /// Rounds recorded
    pub fn rounds(&self) -> usize {
        self.wins + self.losses + self.failures
    }

    /// The older integer scoring: five per win, minus two per loss
    pub fn old_score(&self) -> i64 {
        5 * self.wins as i64 - 2 * self.losses as i64
    }

    /// Average guesses per won round
    pub fn avg_guesses(&self) -> f64 {
        if self.wins == 0 {
            0.0
        } else {
            self.win_guesses as f64 / self.wins as f64
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.rounds() == 0 {
            0.0
        } else {
            self.wins as f64 / self.rounds() as f64
        }
    }
}

impl fmt::Display for Results {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{Wins: {}, Losses: {}, Failures: {}, Score: {}}}",
            self.wins, self.losses, self.failures, self.score
        )
    }
}
