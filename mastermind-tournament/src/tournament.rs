//! Tournament execution - generated and practice tournaments
//!
//! Level 2 - Phases

use rand::Rng;
use serde::Serialize;
use std::time::{Duration, Instant};

use mastermind_core::{Alphabet, Code, CodeError, Distribution, Guesser};

use crate::config::TournamentConfig;
use crate::results::Results;
use crate::round::{Outcome, Round};

/// Why a tournament stopped before its last round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum HaltReason {
    /// The tournament wall-clock budget ran out; the last round is not counted
    TimeBudgetExceeded,
    /// A round ended with a malformed guess
    Failure,
}

/// Result of one tournament
#[derive(Clone, Debug, Serialize)]
pub struct TournamentReport {
    pub player: String,
    pub distribution: String,
    pub board_length: usize,
    pub num_colors: usize,
    pub rounds_requested: usize,
    pub results: Results,
    pub halted: Option<HaltReason>,
    pub elapsed_secs: f64,
}

/// The game master: owns the alphabet and the tournament clock
pub struct Mastermind {
    config: TournamentConfig,
    alphabet: Alphabet,
    time_used: Duration,
}

impl Mastermind {
    /// Game over the first `num_colors` capital letters
    pub fn new(config: TournamentConfig) -> Result<Self, CodeError> {
        let alphabet = Alphabet::letters(config.num_colors)?;
        Ok(Self::with_alphabet(config, alphabet))
    }

    /// Game over a custom alphabet; `num_colors` follows the alphabet
    pub fn with_alphabet(mut config: TournamentConfig, alphabet: Alphabet) -> Self {
        config.num_colors = alphabet.len();
        Self {
            config,
            alphabet,
            time_used: Duration::ZERO,
        }
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Time spent in the last tournament
    pub fn time_used(&self) -> Duration {
        self.time_used
    }

    // ========================================================================
    // Level 1 - Entry points
    // ========================================================================

    /// Play `rounds` rounds against fresh codes from `distribution`
    pub fn play_tournament<G, R>(
        &mut self,
        guesser: &mut G,
        distribution: Distribution,
        rounds: usize,
        rng: &mut R,
    ) -> Result<TournamentReport, CodeError>
    where
        G: Guesser + ?Sized,
        R: Rng + ?Sized,
    {
        let codes =
            distribution.generate_many(self.config.board_length, &self.alphabet, rounds, rng)?;
        Ok(self.run(guesser, distribution.name(), &codes))
    }

    /// Play one round per pregenerated code
    pub fn practice_tournament<G>(
        &mut self,
        guesser: &mut G,
        distribution: &str,
        codes: &[Code],
    ) -> TournamentReport
    where
        G: Guesser + ?Sized,
    {
        self.run(guesser, distribution, codes)
    }

    // ========================================================================
    // Level 2 - Round loop
    // ========================================================================

    fn run<G: Guesser + ?Sized>(
        &mut self,
        guesser: &mut G,
        distribution: &str,
        codes: &[Code],
    ) -> TournamentReport {
        let board_length = self.config.board_length;
        let num_colors = self.alphabet.len();
        let mut results = Results::new();
        let mut halted = None;
        self.time_used = Duration::ZERO;

        for code in codes {
            let start = Instant::now();
            let round = Round::new(&self.alphabet, code, distribution, &self.config.round)
                .play(guesser);
            self.time_used += start.elapsed();

            if self.time_used > self.config.time_cutoff {
                tracing::warn!(
                    "{} on {}: tournament time budget of {:.1}s exceeded after {} rounds",
                    guesser.name(),
                    distribution,
                    self.config.time_cutoff.as_secs_f64(),
                    results.rounds()
                );
                halted = Some(HaltReason::TimeBudgetExceeded);
                break;
            }

            results.record(&round, board_length, num_colors);

            if round.outcome == Outcome::Failure && self.config.stop_on_failure {
                tracing::warn!("{} on {}: malformed guess, tournament stopped", guesser.name(), distribution);
                halted = Some(HaltReason::Failure);
                break;
            }
        }

        tracing::info!(
            "{} on {} ({} pegs, {} colors): {}",
            guesser.name(),
            distribution,
            board_length,
            num_colors,
            results
        );

        TournamentReport {
            player: guesser.name().to_string(),
            distribution: distribution.to_string(),
            board_length,
            num_colors,
            rounds_requested: codes.len(),
            results,
            halted,
            elapsed_secs: self.time_used.as_secs_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mastermind_core::{EndgameAgent, Feedback, LexicographicGuesser};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct Garbage;

    impl Guesser for Garbage {
        fn name(&self) -> &str {
            "garbage"
        }

        fn make_guess(&mut self, _: usize, _: &Alphabet, _: &str, _: Feedback) -> String {
            "?".to_string()
        }
    }

    #[test]
    fn test_play_tournament_wins_everything() {
        let mut game = Mastermind::new(TournamentConfig::new(4, 6)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut agent = EndgameAgent::new();

        let report = game
            .play_tournament(&mut agent, Distribution::InsertColors, 20, &mut rng)
            .unwrap();
        assert_eq!(report.results.wins, 20);
        assert_eq!(report.results.rounds(), 20);
        assert!(report.results.score > 0.0);
        assert!(report.halted.is_none());
        assert_eq!(report.player, "Endgame");
        assert_eq!(report.distribution, "InsertColors");
    }

    #[test]
    fn test_failure_stops_tournament() {
        let mut game = Mastermind::new(TournamentConfig::new(4, 6)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let report = game
            .play_tournament(&mut Garbage, Distribution::InsertColors, 10, &mut rng)
            .unwrap();
        assert_eq!(report.results.failures, 1);
        assert_eq!(report.results.rounds(), 1);
        assert_eq!(report.results.score, -48.0);
        assert_eq!(report.halted, Some(HaltReason::Failure));
    }

    #[test]
    fn test_failures_continue_when_configured() {
        let config = TournamentConfig::new(4, 6).with_stop_on_failure(false);
        let mut game = Mastermind::new(config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let report = game
            .play_tournament(&mut Garbage, Distribution::InsertColors, 3, &mut rng)
            .unwrap();
        assert_eq!(report.results.failures, 3);
        assert!(report.halted.is_none());
    }

    #[test]
    fn test_zero_time_budget_halts_before_recording() {
        let config = TournamentConfig::new(4, 6).with_time_cutoff(Duration::ZERO);
        let mut game = Mastermind::new(config).unwrap();
        let codes = vec![game.alphabet().parse("ABCD", 4).unwrap()];

        let report = game.practice_tournament(&mut EndgameAgent::new(), "InsertColors", &codes);
        assert_eq!(report.results.rounds(), 0);
        assert_eq!(report.halted, Some(HaltReason::TimeBudgetExceeded));
    }

    #[test]
    fn test_practice_tournament_with_baseline() {
        let mut game = Mastermind::new(TournamentConfig::new(3, 3)).unwrap();
        let codes: Vec<Code> = ["ABC", "CCC", "BAA"]
            .iter()
            .map(|s| game.alphabet().parse(s, 3).unwrap())
            .collect();

        let report = game.practice_tournament(&mut LexicographicGuesser::new(), "FirstLast", &codes);
        assert_eq!(report.results.wins, 3);
        assert_eq!(report.rounds_requested, 3);
        assert_eq!(report.player, "baseline");
    }

    #[test]
    fn test_report_serializes() {
        let mut game = Mastermind::new(TournamentConfig::new(4, 6)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let report = game
            .play_tournament(&mut Garbage, Distribution::FirstLast, 2, &mut rng)
            .unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["player"], "garbage");
        assert_eq!(json["halted"], "Failure");
        assert_eq!(json["results"]["failures"], 1);
    }

    #[test]
    fn test_unsupported_distribution() {
        let mut game = Mastermind::new(TournamentConfig::new(4, 2)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = game.play_tournament(
            &mut EndgameAgent::new(),
            Distribution::UsuallyFewer,
            5,
            &mut rng,
        );
        assert!(result.is_err());
    }
}
