//! Bounded retries for randomized sampling

/// Attempt counter for rejection sampling over the unknown positions
///
/// The limit is `u * (u - 1)` for `u` unknown positions, never below one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryBudget {
    limit: usize,
    used: usize,
}

impl RetryBudget {
    pub fn for_unknown(unknown: usize) -> Self {
        Self {
            limit: (unknown * unknown.saturating_sub(1)).max(1),
            used: 0,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Count one attempt; true once the budget is used up
    pub fn spend(&mut self) -> bool {
        self.used += 1;
        self.used >= self.limit
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.limit
    }
}
