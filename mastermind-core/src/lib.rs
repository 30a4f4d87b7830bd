//! Mastermind Core - Game rules and code-breaking agent
//!
//! This crate provides the core logic for playing Mastermind:
//! - Color alphabets and peg sequences
//! - Feedback scoring (exact and color-only pegs)
//! - Per-position constraint store and the confirmed-peg gauntlet
//! - Candidate generation (lexicographic and multiset permutations)
//! - The adaptive phase-machine agent and its policy table
//! - Secret-code distributions and pregenerated code files

pub mod code;
pub mod feedback;
pub mod constraints;
pub mod candidates;
pub mod retry;
pub mod policy;
pub mod agent;
pub mod distribution;
pub mod codefile;
pub mod error;

// Re-exports for convenient access
pub use code::{Alphabet, Code, Color, MAX_LETTERS};
pub use feedback::{score, Feedback};
pub use constraints::ConstraintStore;
pub use candidates::{CandidateQueue, Lexicographic, MultisetPermutations, SplicedPermutations};
pub use retry::RetryBudget;
pub use policy::{Placement, PolicyRule, PolicyTable, Strategy};
pub use agent::{AgentState, EndgameAgent, Guesser, LexicographicGuesser, Phase};
pub use distribution::Distribution;
pub use codefile::{code_file_name, read_codes, write_codes};
pub use error::{AgentError, CodeError};
