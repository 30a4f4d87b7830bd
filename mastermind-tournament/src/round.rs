//! A single round: one secret code, one guesser
//!
//! Level 3 - Steps

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use mastermind_core::{score, Alphabet, Code, Feedback, Guesser};

use crate::config::RoundConfig;

/// Verdict on a guess, and on a finished round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    /// The guess was malformed
    Failure,
    /// Well-formed but not the code; the round goes on
    Valid,
}

/// What the harness says back to a guess
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Response {
    pub outcome: Outcome,
    pub feedback: Feedback,
}

/// How a round ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RoundResult {
    pub outcome: Outcome,
    pub guesses: usize,
    #[serde(skip)]
    pub time_used: Duration,
}

pub struct Round<'a> {
    alphabet: &'a Alphabet,
    code: &'a Code,
    distribution: &'a str,
    config: &'a RoundConfig,
    guesses: usize,
    time_used: Duration,
}

impl<'a> Round<'a> {
    pub fn new(
        alphabet: &'a Alphabet,
        code: &'a Code,
        distribution: &'a str,
        config: &'a RoundConfig,
    ) -> Self {
        Self {
            alphabet,
            code,
            distribution,
            config,
            guesses: 0,
            time_used: Duration::ZERO,
        }
    }

    pub fn guesses(&self) -> usize {
        self.guesses
    }

    pub fn time_used(&self) -> Duration {
        self.time_used
    }

    /// Charge guesser time against the round budget
    pub fn add_time(&mut self, elapsed: Duration) {
        self.time_used += elapsed;
    }

    /// Score one guess
    ///
    /// The time budget is checked first; a guess that does not parse
    /// against the alphabet and board length is a failure with no pegs.
    pub fn respond_to_guess(&mut self, guess: &str) -> Response {
        self.guesses += 1;
        let board_length = self.code.len();

        if self.time_used > self.config.time_limit() {
            tracing::warn!(
                "Round over time: {:.3}s used of {:.3}s",
                self.time_used.as_secs_f64(),
                self.config.time_limit().as_secs_f64()
            );
            return self.respond(Outcome::Loss, 0, 0);
        }

        match self.alphabet.parse(guess, board_length) {
            Ok(parsed) if parsed == *self.code => self.respond(Outcome::Win, board_length, 0),
            Ok(parsed) => {
                let (exact, color_only) = score(&parsed, self.code);
                self.respond(Outcome::Valid, exact, color_only)
            }
            Err(e) => {
                tracing::warn!("Malformed guess {:?}: {}", guess, e);
                self.respond(Outcome::Failure, 0, 0)
            }
        }
    }

    fn respond(&self, outcome: Outcome, exact: usize, color_only: usize) -> Response {
        Response {
            outcome,
            feedback: Feedback::new(exact, color_only, self.guesses),
        }
    }

    /// Play the round to the end
    pub fn play<G: Guesser + ?Sized>(&mut self, guesser: &mut G) -> RoundResult {
        let board_length = self.code.len();
        let mut last = Feedback::initial();

        while self.guesses < self.config.guess_cutoff {
            let start = Instant::now();
            let guess = guesser.make_guess(board_length, self.alphabet, self.distribution, last);
            self.add_time(start.elapsed());

            let response = self.respond_to_guess(&guess);
            last = response.feedback;
            if response.outcome != Outcome::Valid {
                return self.finish(response.outcome);
            }
        }
        self.finish(Outcome::Loss)
    }

    fn finish(&self, outcome: Outcome) -> RoundResult {
        tracing::debug!("Round {:?} after {} guesses", outcome, self.guesses);
        RoundResult {
            outcome,
            guesses: self.guesses,
            time_used: self.time_used,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mastermind_core::EndgameAgent;

    /// Always answers the same string
    struct Parrot(&'static str);

    impl Guesser for Parrot {
        fn name(&self) -> &str {
            "parrot"
        }

        fn make_guess(&mut self, _: usize, _: &Alphabet, _: &str, _: Feedback) -> String {
            self.0.to_string()
        }
    }

    fn fixture() -> (Alphabet, Code, RoundConfig) {
        let alphabet = Alphabet::letters(3).unwrap();
        let code = alphabet.parse("AABB", 4).unwrap();
        (alphabet, code, RoundConfig::default())
    }

    #[test]
    fn test_respond_valid_and_win() {
        let (alphabet, code, config) = fixture();
        let mut round = Round::new(&alphabet, &code, "InsertColors", &config);

        let response = round.respond_to_guess("BBAA");
        assert_eq!(response.outcome, Outcome::Valid);
        assert_eq!(response.feedback, Feedback::new(0, 4, 1));

        let response = round.respond_to_guess("AABB");
        assert_eq!(response.outcome, Outcome::Win);
        assert_eq!(response.feedback, Feedback::new(4, 0, 2));
    }

    #[test]
    fn test_malformed_guesses_fail() {
        let (alphabet, code, config) = fixture();
        let mut round = Round::new(&alphabet, &code, "InsertColors", &config);
        assert_eq!(round.respond_to_guess("AAB").outcome, Outcome::Failure);
        assert_eq!(round.respond_to_guess("AABZ").outcome, Outcome::Failure);
        assert_eq!(round.respond_to_guess("AABZ").feedback.exact, 0);
    }

    #[test]
    fn test_over_time_is_loss() {
        let (alphabet, code, config) = fixture();
        let mut round = Round::new(&alphabet, &code, "InsertColors", &config);
        round.add_time(Duration::from_secs(6));
        // Even the right answer loses once the budget is blown
        assert_eq!(round.respond_to_guess("AABB").outcome, Outcome::Loss);
    }

    #[test]
    fn test_guess_cutoff_is_loss() {
        let (alphabet, code, _) = fixture();
        let config = RoundConfig::default().with_guess_cutoff(3);
        let mut round = Round::new(&alphabet, &code, "InsertColors", &config);
        let result = round.play(&mut Parrot("CCCC"));
        assert_eq!(result.outcome, Outcome::Loss);
        assert_eq!(result.guesses, 3);
    }

    #[test]
    fn test_play_failure_stops_round() {
        let (alphabet, code, config) = fixture();
        let mut round = Round::new(&alphabet, &code, "InsertColors", &config);
        let result = round.play(&mut Parrot("nope"));
        assert_eq!(result.outcome, Outcome::Failure);
        assert_eq!(result.guesses, 1);
    }

    #[test]
    fn test_play_with_agent() {
        let (alphabet, code, config) = fixture();
        let mut round = Round::new(&alphabet, &code, "InsertColors", &config);
        let result = round.play(&mut EndgameAgent::new());
        assert_eq!(result.outcome, Outcome::Win);
        assert_eq!(result.guesses, 2);
    }
}
