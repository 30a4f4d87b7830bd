//! Error types

use crate::agent::Phase;

/// Errors raised while building alphabets, parsing codes or generating them
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeError {
    #[error("alphabet must contain at least one color")]
    EmptyAlphabet,

    #[error("alphabet of {0} colors is too large")]
    AlphabetTooLarge(usize),

    #[error("color {0:?} appears more than once in the alphabet")]
    DuplicateColor(char),

    #[error("expected {expected} pegs, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("color {0:?} is not part of the alphabet")]
    UnknownColor(char),

    #[error("unknown distribution: {0}")]
    UnknownDistribution(String),

    #[error("{distribution} cannot generate {length} pegs from {colors} colors")]
    UnsupportedDistribution {
        distribution: String,
        length: usize,
        colors: usize,
    },
}

/// Conditions the agent cannot turn into a next guess
///
/// Both are recovered inside `make_guess` by a reset; they are kept
/// distinct so logs tell a drained candidate source apart from bad input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    #[error("candidate source exhausted during {phase:?}")]
    CandidateExhaustion { phase: Phase },

    #[error("feedback ({exact}, {color_only}) is impossible on a board of {board_length} pegs")]
    InvalidFeedback {
        exact: usize,
        color_only: usize,
        board_length: usize,
    },
}
