//! Phase machine state for one round
//!
//! Level 2 - Phase-level implementation. Each `after_*` method consumes
//! the feedback for the guess the phase last issued and returns the next
//! guess, possibly moving to another phase.

use rand::Rng;

use super::placement::PlacementState;
use super::search::SearchLog;
use super::swap::ShuffleState;
use super::Phase;
use crate::candidates::{CandidateQueue, Lexicographic, MultisetPermutations, SplicedPermutations};
use crate::code::{Code, Color};
use crate::constraints::ConstraintStore;
use crate::error::AgentError;
use crate::feedback::Feedback;
use crate::policy::{Placement, Strategy};

/// Everything the agent knows about the round in progress
///
/// Rebuilt from scratch at every round start and after an internal reset.
#[derive(Clone, Debug)]
pub struct AgentState {
    board_length: usize,
    num_colors: usize,
    strategy: Strategy,
    phase: Phase,
    store: ConstraintStore,
    queue: CandidateQueue,
    /// Index of the next color to try
    color_cursor: usize,
    current_color: Color,
    last_guess: Code,
    /// Colors found by discovery with their multiplicities
    discovered: Vec<(Color, usize)>,
    discovered_total: usize,
    search: Option<SearchLog>,
    placement: Option<PlacementState>,
    shuffle: Option<ShuffleState>,
}

impl AgentState {
    pub fn new(board_length: usize, num_colors: usize, strategy: Strategy) -> Self {
        Self {
            board_length,
            num_colors,
            strategy,
            phase: initial_phase(strategy),
            store: ConstraintStore::new(board_length),
            queue: CandidateQueue::Empty,
            color_cursor: 0,
            current_color: Color(0),
            last_guess: Code::monochrome(Color(0), board_length),
            discovered: Vec::new(),
            discovered_total: 0,
            search: None,
            placement: None,
            shuffle: None,
        }
    }

    pub fn board_length(&self) -> usize {
        self.board_length
    }

    pub fn num_colors(&self) -> usize {
        self.num_colors
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn store(&self) -> &ConstraintStore {
        &self.store
    }

    pub fn last_guess(&self) -> &Code {
        &self.last_guess
    }

    pub fn discovered(&self) -> &[(Color, usize)] {
        &self.discovered
    }

    /// The canonical opening: every peg the first color
    pub fn first_guess(&mut self) -> Code {
        self.current_color = Color(0);
        self.color_cursor = 1;
        self.phase = initial_phase(self.strategy);
        if self.phase == Phase::Enumerate {
            let mut source = Lexicographic::new(self.board_length, self.num_colors);
            source.next();
            self.queue = CandidateQueue::Enumerate(source);
        }
        self.last_guess = Code::monochrome(self.current_color, self.board_length);
        self.last_guess.clone()
    }

    /// Feed back the response to the last guess and produce the next one
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        feedback: Feedback,
        rng: &mut R,
    ) -> Result<Code, AgentError> {
        if feedback.total() > self.board_length {
            return Err(AgentError::InvalidFeedback {
                exact: feedback.exact,
                color_only: feedback.color_only,
                board_length: self.board_length,
            });
        }

        let guess = match self.phase {
            Phase::Try => self.after_try(feedback)?,
            Phase::Search => self.after_search(feedback)?,
            Phase::Enumerate => self.after_enumerate(feedback)?,
            Phase::ColorDiscovery => self.after_discovery(feedback, rng)?,
            Phase::Placement => self.after_placement(feedback)?,
            Phase::Shuffle => self.after_shuffle(feedback, rng)?,
            Phase::Swap => self.after_swap(feedback, rng)?,
        };
        self.last_guess = guess.clone();
        Ok(guess)
    }

    // ========================================================================
    // Level 3 - Helpers
    // ========================================================================

    fn exhausted(&self) -> AgentError {
        AgentError::CandidateExhaustion { phase: self.phase }
    }

    fn enter(&mut self, phase: Phase) {
        if self.phase != phase {
            tracing::debug!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Take the next untried color; running out is exhaustion
    ///
    /// Colors already ruled out at every unknown position are skipped.
    fn next_color(&mut self) -> Result<Color, AgentError> {
        let unknown = self.store.unknown_positions();
        while self.color_cursor < self.num_colors {
            let color = Color(self.color_cursor as u8);
            self.color_cursor += 1;
            if !self.is_absent(color, &unknown) {
                return Ok(color);
            }
        }
        Err(self.exhausted())
    }

    /// Filler for a search: the next color after the cursor that may still
    /// occupy an unknown position
    fn peek_next_color(&self) -> Color {
        let unknown = self.store.unknown_positions();
        let wrapped = |i: usize| Color(((self.color_cursor + i) % self.num_colors) as u8);
        (0..self.num_colors)
            .map(wrapped)
            .find(|&c| c != self.current_color && !self.is_absent(c, &unknown))
            .unwrap_or_else(|| wrapped(0))
    }

    fn is_absent(&self, color: Color, unknown: &[usize]) -> bool {
        !unknown.is_empty() && unknown.iter().all(|&p| self.store.is_ruled_out(p, color))
    }

    // ========================================================================
    // Try and search
    // ========================================================================

    fn after_try(&mut self, feedback: Feedback) -> Result<Code, AgentError> {
        let confirmed = self.store.num_confirmed();
        let unknown = self.store.num_unknown();

        if feedback.total() <= confirmed {
            self.store.rule_out_everywhere(self.current_color);
            self.current_color = self.next_color()?;
            return Ok(self.store.fill_unknown(self.current_color));
        }

        let count = (feedback.total() - confirmed).min(unknown);
        let filler = self.peek_next_color();
        let perms = MultisetPermutations::from_counts([
            (self.current_color, count),
            (filler, unknown - count),
        ]);
        self.queue = CandidateQueue::Permutations(SplicedPermutations::new(
            self.store.gauntlet().to_vec(),
            perms,
        ));
        self.search = Some(SearchLog::new(
            self.current_color,
            count,
            self.store.unknown_positions(),
        ));
        self.enter(Phase::Search);
        self.queue
            .next_admissible(&self.store)
            .ok_or_else(|| self.exhausted())
    }

    fn after_search(&mut self, feedback: Feedback) -> Result<Code, AgentError> {
        if feedback.color_only > 0 {
            let phase = self.phase;
            let Some(log) = self.search.as_mut() else {
                return Err(AgentError::CandidateExhaustion { phase });
            };
            log.record(&self.last_guess, feedback, self.store.num_confirmed());
            tracing::trace!("Search for {:?}: {} answers so far", self.current_color, log.len());
            let log = &*log;
            return self
                .queue
                .next_matching(&self.store, |candidate| log.is_consistent(candidate))
                .ok_or(AgentError::CandidateExhaustion { phase });
        }

        // Every peg of the tried color sits where the guess put it
        let color = self.current_color;
        for position in self.store.unknown_positions() {
            if self.last_guess[position] == color {
                self.store.confirm(position, color);
            }
        }
        self.queue.clear();
        self.search = None;

        if self.store.is_solved() {
            return Ok(self.store.splice(&[]));
        }
        self.current_color = self.next_color()?;
        self.enter(Phase::Try);
        Ok(self.store.fill_unknown(self.current_color))
    }

    // ========================================================================
    // Enumeration
    // ========================================================================

    fn after_enumerate(&mut self, feedback: Feedback) -> Result<Code, AgentError> {
        if feedback.exact == 0 {
            for (position, &color) in self.last_guess.iter().enumerate() {
                self.store.rule_out_color(position, color);
            }
        }
        if feedback.total() == 0 {
            for &color in self.last_guess.iter() {
                self.store.rule_out_everywhere(color);
            }
        }
        self.queue
            .next_admissible(&self.store)
            .ok_or_else(|| self.exhausted())
    }

    // ========================================================================
    // Color discovery
    // ========================================================================

    fn after_discovery<R: Rng + ?Sized>(
        &mut self,
        feedback: Feedback,
        rng: &mut R,
    ) -> Result<Code, AgentError> {
        let color = self.current_color;
        if feedback.exact > 0 {
            self.discovered.push((color, feedback.exact));
            self.discovered_total += feedback.exact;
        } else {
            self.store.rule_out_everywhere(color);
        }

        if self.discovered_total > self.board_length {
            return Err(self.exhausted());
        }

        if self.discovered_total < self.board_length {
            if self.color_cursor + 1 < self.num_colors {
                self.current_color = self.next_color()?;
                return Ok(Code::monochrome(self.current_color, self.board_length));
            }
            // Only one color left: it fills the rest
            let last = self.next_color()?;
            self.discovered
                .push((last, self.board_length - self.discovered_total));
            self.discovered_total = self.board_length;
        }

        self.begin_arrangement(rng)
    }

    /// Leave discovery with the full multiset known
    fn begin_arrangement<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Code, AgentError> {
        match self.strategy {
            Strategy::Shuffle => {
                let mut shuffle = ShuffleState::new(&self.discovered, &self.store);
                self.enter(Phase::Shuffle);
                let guess = shuffle.next_shuffle(&self.store, rng);
                self.shuffle = Some(shuffle);
                Ok(guess)
            }
            Strategy::ColorFirst {
                placement: Placement::Search,
            } => {
                self.color_cursor = 0;
                self.current_color = self.next_color()?;
                self.enter(Phase::Try);
                Ok(self.store.fill_unknown(self.current_color))
            }
            Strategy::ColorFirst { placement } => {
                let mut state = PlacementState::new(
                    &self.discovered,
                    self.board_length,
                    placement == Placement::Alternating,
                );
                self.enter(Phase::Placement);
                let guess = state.next_guess(&mut self.store);
                self.placement = Some(state);
                guess.ok_or_else(|| self.exhausted())
            }
            Strategy::TryAndSearch | Strategy::Exhaustive => Err(self.exhausted()),
        }
    }

    // ========================================================================
    // Placement
    // ========================================================================

    fn after_placement(&mut self, feedback: Feedback) -> Result<Code, AgentError> {
        let phase = self.phase;
        let Some(state) = self.placement.as_mut() else {
            return Err(AgentError::CandidateExhaustion { phase });
        };
        if !state.observe(feedback.exact, &mut self.store) {
            return Err(AgentError::CandidateExhaustion { phase });
        }
        state
            .next_guess(&mut self.store)
            .ok_or(AgentError::CandidateExhaustion { phase })
    }

    // ========================================================================
    // Shuffle and swap
    // ========================================================================

    fn after_shuffle<R: Rng + ?Sized>(
        &mut self,
        feedback: Feedback,
        rng: &mut R,
    ) -> Result<Code, AgentError> {
        let Some(mut shuffle) = self.shuffle.take() else {
            return Err(self.exhausted());
        };

        let swapping = shuffle.observe_shuffle(&self.last_guess, feedback.exact, &mut self.store);
        let guess = if swapping {
            self.enter(Phase::Swap);
            self.swap_or_shuffle(&mut shuffle, rng)
        } else {
            shuffle.next_shuffle(&self.store, rng)
        };

        self.shuffle = Some(shuffle);
        Ok(guess)
    }

    fn after_swap<R: Rng + ?Sized>(
        &mut self,
        feedback: Feedback,
        rng: &mut R,
    ) -> Result<Code, AgentError> {
        let Some(mut shuffle) = self.shuffle.take() else {
            return Err(self.exhausted());
        };

        shuffle.observe_swap(feedback.exact, &mut self.store);
        let guess = if self.store.is_solved() {
            self.store.splice(&[])
        } else if shuffle.keep_swapping() {
            self.swap_or_shuffle(&mut shuffle, rng)
        } else {
            self.enter(Phase::Shuffle);
            shuffle.next_shuffle(&self.store, rng)
        };

        self.shuffle = Some(shuffle);
        Ok(guess)
    }

    fn swap_or_shuffle<R: Rng + ?Sized>(&mut self, shuffle: &mut ShuffleState, rng: &mut R) -> Code {
        match shuffle.next_swap(&self.store, rng) {
            Some(guess) => guess,
            None => {
                self.enter(Phase::Shuffle);
                shuffle.next_shuffle(&self.store, rng)
            }
        }
    }
}

fn initial_phase(strategy: Strategy) -> Phase {
    match strategy {
        Strategy::TryAndSearch => Phase::Try,
        Strategy::ColorFirst { .. } | Strategy::Shuffle => Phase::ColorDiscovery,
        Strategy::Exhaustive => Phase::Enumerate,
    }
}
