//! Strategy policy table
//!
//! Maps a distribution name and board length to the search strategy the
//! agent runs for the round. The thresholds are empirical and kept as data
//! so they can be tuned from a JSON file without touching the agent.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the agent attacks a round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Monochrome guesses per color, then permutation search per color
    TryAndSearch,
    /// Discover the full color multiset, then place it deterministically
    ColorFirst { placement: Placement },
    /// Discover the multiset, then random shuffles refined by pair swaps
    Shuffle,
    /// Lexicographic enumeration filtered by the constraint store
    Exhaustive,
}

/// Placement flavour for `Strategy::ColorFirst`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    PegScan,
    /// Try the two alternating arrangements before the peg scan
    Alternating,
    /// Try and search over the colors discovery found present
    Search,
}

/// One row of the table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRule {
    pub distribution: String,
    /// Only match boards strictly longer than this
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longer_than: Option<usize>,
    pub strategy: Strategy,
}

impl PolicyRule {
    pub fn new(distribution: &str, strategy: Strategy) -> Self {
        Self {
            distribution: distribution.to_string(),
            longer_than: None,
            strategy,
        }
    }

    pub fn longer_than(mut self, board_length: usize) -> Self {
        self.longer_than = Some(board_length);
        self
    }

    pub fn matches(&self, distribution: &str, board_length: usize) -> bool {
        self.distribution == distribution
            && self.longer_than.map_or(true, |min| board_length > min)
    }
}

/// Ordered rules, first match wins
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyTable {
    pub rules: Vec<PolicyRule>,
    pub fallback: Strategy,
}

impl Default for PolicyTable {
    fn default() -> Self {
        let color_first = Strategy::ColorFirst {
            placement: Placement::PegScan,
        };
        Self {
            rules: vec![
                PolicyRule::new("ABColor", color_first),
                PolicyRule::new("TwoColor", color_first),
                PolicyRule::new(
                    "TwoColorAlternating",
                    Strategy::ColorFirst {
                        placement: Placement::Alternating,
                    },
                ),
                PolicyRule::new(
                    "mystery1",
                    Strategy::ColorFirst {
                        placement: Placement::Search,
                    },
                ),
                PolicyRule::new("mystery2", color_first),
                PolicyRule::new("PreferFewer", Strategy::Shuffle),
                PolicyRule::new("UsuallyFewer", Strategy::Shuffle),
                PolicyRule::new("InsertColors", Strategy::Shuffle).longer_than(15),
                PolicyRule::new("OnlyOnce", Strategy::Shuffle).longer_than(22),
                PolicyRule::new("FirstLast", Strategy::Shuffle).longer_than(20),
                PolicyRule::new("mystery3", Strategy::Shuffle),
                PolicyRule::new("mystery4", Strategy::Shuffle),
                PolicyRule::new("mystery5", Strategy::Shuffle),
                PolicyRule::new("mystery7", Strategy::Shuffle),
            ],
            fallback: Strategy::TryAndSearch,
        }
    }
}

impl PolicyTable {
    /// Table that answers `strategy` for everything
    pub fn uniform(strategy: Strategy) -> Self {
        Self {
            rules: Vec::new(),
            fallback: strategy,
        }
    }

    pub fn select(&self, distribution: &str, board_length: usize) -> Strategy {
        self.rules
            .iter()
            .find(|rule| rule.matches(distribution, board_length))
            .map_or(self.fallback, |rule| rule.strategy)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let table = serde_json::from_str(&content)?;
        Ok(table)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
