//! Configuration types for rounds, tournaments and sweeps
//!
//! Level 4 - Utilities and configuration

use std::time::Duration;

/// Budgets for a single round
#[derive(Clone, Debug, PartialEq)]
pub struct RoundConfig {
    /// Guesses allowed before the round is lost
    pub guess_cutoff: usize,
    /// Wall-clock time the guesser may spend in the round
    pub time_cutoff: Duration,
    /// Grace period on top of `time_cutoff`
    pub time_buffer: Duration,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            guess_cutoff: 100,
            time_cutoff: Duration::from_secs(5),
            time_buffer: Duration::from_millis(100),
        }
    }
}

impl RoundConfig {
    pub fn with_guess_cutoff(mut self, guess_cutoff: usize) -> Self {
        self.guess_cutoff = guess_cutoff;
        self
    }

    pub fn with_time_cutoff(mut self, time_cutoff: Duration) -> Self {
        self.time_cutoff = time_cutoff;
        self
    }

    /// Time after which the round counts as lost
    pub fn time_limit(&self) -> Duration {
        self.time_cutoff + self.time_buffer
    }
}

/// Tournament configuration
#[derive(Clone, Debug, PartialEq)]
pub struct TournamentConfig {
    /// Pegs per code
    pub board_length: usize,
    /// Colors in the alphabet
    pub num_colors: usize,
    /// Budgets applied to each round
    pub round: RoundConfig,
    /// Wall-clock budget for the whole tournament
    pub time_cutoff: Duration,
    /// Halt at the first malformed guess
    pub stop_on_failure: bool,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            board_length: 4,
            num_colors: 6,
            round: RoundConfig::default(),
            time_cutoff: Duration::from_secs(300),
            stop_on_failure: true,
        }
    }
}

impl TournamentConfig {
    /// Create config for the given board shape
    pub fn new(board_length: usize, num_colors: usize) -> Self {
        Self {
            board_length,
            num_colors,
            ..Default::default()
        }
    }

    pub fn with_round(mut self, round: RoundConfig) -> Self {
        self.round = round;
        self
    }

    pub fn with_time_cutoff(mut self, time_cutoff: Duration) -> Self {
        self.time_cutoff = time_cutoff;
        self
    }

    pub fn with_stop_on_failure(mut self, stop_on_failure: bool) -> Self {
        self.stop_on_failure = stop_on_failure;
        self
    }
}

/// Configuration for a sweep of independent tournaments
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SweepConfig {
    /// Rounds per tournament
    pub rounds: usize,
    /// Whether to run tournaments in parallel
    pub parallel: bool,
    /// Base seed; tournament `i` draws codes from `seed + i`
    pub seed: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            rounds: 100,
            parallel: true,
            seed: 0,
        }
    }
}

impl SweepConfig {
    pub fn new(rounds: usize) -> Self {
        Self {
            rounds,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
