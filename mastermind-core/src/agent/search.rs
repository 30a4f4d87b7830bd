//! Bookkeeping for the permutation search of one color
//!
//! A search guess puts the searched color on a subset `S` of the unknown
//! positions and the filler color on the rest. With `j` the overlap between
//! `S` and a hypothesis `S'`, the exact pegs beyond the gauntlet are `j`
//! plus the filler pegs that land on filler positions of the code. Those
//! lie in the positions neither subset covers, which bounds them.

use crate::code::{Code, Color};
use crate::feedback::Feedback;

/// Search guesses for the current color and what they scored
#[derive(Clone, Debug)]
pub(super) struct SearchLog {
    color: Color,
    /// Pegs of `color` among the unknown positions
    count: usize,
    unknown: Vec<usize>,
    /// Filler pegs among the unknown positions, known after one answer
    filler_count: Option<usize>,
    /// Guesses paired with their exact pegs beyond the gauntlet
    history: Vec<(Code, usize)>,
}

impl SearchLog {
    pub fn new(color: Color, count: usize, unknown: Vec<usize>) -> Self {
        Self {
            color,
            count,
            unknown,
            filler_count: None,
            history: Vec::new(),
        }
    }

    /// Record a search guess that did not place the color
    pub fn record(&mut self, guess: &Code, feedback: Feedback, confirmed: usize) {
        let free = self.unknown.len().saturating_sub(self.count);
        let filler = feedback
            .total()
            .saturating_sub(confirmed + self.count)
            .min(free);
        self.filler_count = Some(filler);
        self.history
            .push((guess.clone(), feedback.exact.saturating_sub(confirmed)));
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    fn overlap(&self, a: &Code, b: &Code) -> usize {
        self.unknown
            .iter()
            .filter(|&&p| a[p] == self.color && b[p] == self.color)
            .count()
    }

    /// Whether `candidate` can still be the placement of the color
    pub fn is_consistent(&self, candidate: &Code) -> bool {
        let Some(filler) = self.filler_count else {
            return true;
        };
        let unknown = self.unknown.len();
        self.history.iter().all(|(guess, exact)| {
            let shared = self.overlap(guess, candidate);
            let uncovered = (unknown + shared).saturating_sub(2 * self.count);
            let low = shared + (filler + shared).saturating_sub(self.count);
            let high = shared + filler.min(uncovered);
            (low..=high).contains(exact)
        })
    }
}
