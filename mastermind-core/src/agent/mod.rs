//! Code-breaking agents
//!
//! Every guesser is driven through the same call: the harness passes the
//! board shape, the distribution name and the feedback for the previous
//! guess, and gets the next guess back as a string. A feedback with
//! `guess_number == 0` opens a new round.
//!
//! `EndgameAgent` runs one phase machine (`AgentState`) configured by a
//! `PolicyTable`. Internal dead ends never escape `make_guess`: the agent
//! logs them, resets to the first-guess condition and starts over.

mod placement;
mod search;
mod state;
mod swap;

pub use state::AgentState;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::code::{Alphabet, Code};
use crate::error::AgentError;
use crate::feedback::Feedback;
use crate::policy::{PolicyTable, Strategy};

/// Where the phase machine currently is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Monochrome guesses counting each color
    ColorDiscovery,
    /// Deterministic placement of a known multiset
    Placement,
    /// Try one color across every unconfirmed position
    Try,
    /// Permutation search placing the tried color
    Search,
    /// Lexicographic enumeration
    Enumerate,
    /// Random arrangements of the remaining multiset
    Shuffle,
    /// Pair swaps on the best arrangement so far
    Swap,
}

/// Anything that can play a round of Mastermind
pub trait Guesser {
    fn name(&self) -> &str;

    /// Produce the next guess given the feedback on the previous one
    fn make_guess(
        &mut self,
        board_length: usize,
        colors: &Alphabet,
        distribution: &str,
        last: Feedback,
    ) -> String;
}

impl<G: Guesser + ?Sized> Guesser for Box<G> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn make_guess(
        &mut self,
        board_length: usize,
        colors: &Alphabet,
        distribution: &str,
        last: Feedback,
    ) -> String {
        (**self).make_guess(board_length, colors, distribution, last)
    }
}

// ============================================================================
// ENDGAME AGENT
// ============================================================================

/// The adaptive, policy-driven agent
#[derive(Clone, Debug)]
pub struct EndgameAgent {
    name: String,
    policy: PolicyTable,
    recovery: Strategy,
    state: Option<AgentState>,
    rng: ChaCha8Rng,
}

impl Default for EndgameAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl EndgameAgent {
    pub fn new() -> Self {
        Self {
            name: "Endgame".to_string(),
            policy: PolicyTable::default(),
            recovery: Strategy::TryAndSearch,
            state: None,
            rng: ChaCha8Rng::seed_from_u64(42),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn with_policy(mut self, policy: PolicyTable) -> Self {
        self.policy = policy;
        self
    }

    /// Strategy used after an internal reset
    pub fn with_recovery(mut self, recovery: Strategy) -> Self {
        self.recovery = recovery;
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn policy(&self) -> &PolicyTable {
        &self.policy
    }

    /// State of the round in progress
    pub fn state(&self) -> Option<&AgentState> {
        self.state.as_ref()
    }

    /// Next guess as a code, starting a round when asked to
    pub fn next_code(
        &mut self,
        board_length: usize,
        num_colors: usize,
        distribution: &str,
        last: Feedback,
    ) -> Code {
        let resumable = self
            .state
            .as_ref()
            .is_some_and(|s| s.board_length() == board_length && s.num_colors() == num_colors);

        if last.is_round_start() || !resumable {
            let strategy = self.policy.select(distribution, board_length);
            tracing::debug!(
                "New round: {} pegs, {} colors, {} -> {:?}",
                board_length,
                num_colors,
                distribution,
                strategy
            );
            return self.restart(board_length, num_colors, strategy);
        }

        let outcome = match self.state.as_mut() {
            Some(state) => state.advance(last, &mut self.rng),
            None => return self.restart(board_length, num_colors, self.recovery),
        };

        match outcome {
            Ok(guess) => guess,
            Err(err) => {
                match &err {
                    AgentError::CandidateExhaustion { .. } => {
                        tracing::warn!("{}: {}, restarting the round", self.name, err)
                    }
                    AgentError::InvalidFeedback { .. } => {
                        tracing::error!("{}: {}, restarting the round", self.name, err)
                    }
                }
                self.restart(board_length, num_colors, self.recovery)
            }
        }
    }

    fn restart(&mut self, board_length: usize, num_colors: usize, strategy: Strategy) -> Code {
        let mut state = AgentState::new(board_length, num_colors, strategy);
        let guess = state.first_guess();
        self.state = Some(state);
        guess
    }
}

impl Guesser for EndgameAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn make_guess(
        &mut self,
        board_length: usize,
        colors: &Alphabet,
        distribution: &str,
        last: Feedback,
    ) -> String {
        let guess = self.next_code(board_length, colors.len(), distribution, last);
        colors.render(&guess)
    }
}

// ============================================================================
// BASELINE
// ============================================================================

/// Lexicographic enumeration filtered by the constraint store
#[derive(Clone, Debug)]
pub struct LexicographicGuesser {
    inner: EndgameAgent,
}

impl Default for LexicographicGuesser {
    fn default() -> Self {
        Self::new()
    }
}

impl LexicographicGuesser {
    pub fn new() -> Self {
        Self {
            inner: EndgameAgent::new()
                .with_name("baseline")
                .with_policy(PolicyTable::uniform(Strategy::Exhaustive))
                .with_recovery(Strategy::Exhaustive),
        }
    }
}

impl Guesser for LexicographicGuesser {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn make_guess(
        &mut self,
        board_length: usize,
        colors: &Alphabet,
        distribution: &str,
        last: Feedback,
    ) -> String {
        self.inner.make_guess(board_length, colors, distribution, last)
    }
}

// ============================================================================
// TESTS
// ============================================================================
