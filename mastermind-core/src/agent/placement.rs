//! Deterministic placement of a known color multiset
//!
//! The working guess starts as the monochrome guess of a base color, whose
//! exact count is already known from discovery. Positions are scanned left
//! to right; substituting one color at the scan position moves the exact
//! count by +1 (substitute is right), -1 (base was right) or not at all
//! (neither is). Positions with a single remaining possibility are fixed
//! without spending a guess.

use std::collections::VecDeque;

use crate::code::{Code, Color};
use crate::constraints::ConstraintStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
    Nothing,
    Pattern,
    Substitution(Color),
}

#[derive(Clone, Debug)]
pub(super) struct PlacementState {
    /// Unplaced occurrences per discovered color
    remaining: Vec<(Color, usize)>,
    base: Color,
    working: Vec<Color>,
    known_exact: usize,
    position: usize,
    tried: Vec<Color>,
    pending: Pending,
    patterns: VecDeque<Code>,
}

impl PlacementState {
    pub(super) fn new(discovered: &[(Color, usize)], board_length: usize, alternating: bool) -> Self {
        let (base, known_exact) = discovered.first().copied().unwrap_or((Color(0), 0));
        let patterns = if alternating {
            alternating_patterns(discovered, board_length)
        } else {
            VecDeque::new()
        };
        Self {
            remaining: discovered.to_vec(),
            base,
            working: vec![base; board_length],
            known_exact,
            position: 0,
            tried: Vec::new(),
            pending: Pending::Nothing,
            patterns,
        }
    }

    /// Take in the exact count for the last guess; false if it contradicts
    /// what is already known
    pub(super) fn observe(&mut self, exact: usize, store: &mut ConstraintStore) -> bool {
        match std::mem::replace(&mut self.pending, Pending::Nothing) {
            Pending::Nothing | Pending::Pattern => true,
            Pending::Substitution(color) => {
                let position = self.position;
                if exact == self.known_exact + 1 {
                    self.fix(position, color, store);
                } else if exact + 1 == self.known_exact {
                    self.fix(position, self.base, store);
                } else if exact == self.known_exact {
                    self.tried.push(color);
                    store.rule_out_color(position, color);
                    store.rule_out_color(position, self.base);
                } else {
                    return false;
                }
                true
            }
        }
    }

    /// Next guess; `None` when no color fits the scan position
    pub(super) fn next_guess(&mut self, store: &mut ConstraintStore) -> Option<Code> {
        if let Some(pattern) = self.patterns.pop_front() {
            self.pending = Pending::Pattern;
            return Some(pattern);
        }

        loop {
            let position = self.position;
            if position >= self.working.len() {
                return Some(self.working.clone().into());
            }

            let possible: Vec<Color> = self
                .remaining
                .iter()
                .filter(|(color, count)| {
                    *count > 0
                        && !store.is_ruled_out(position, *color)
                        && !self.tried.contains(color)
                })
                .map(|(color, _)| *color)
                .collect();

            match possible.as_slice() {
                [] => return None,
                [only] => self.fix(position, *only, store),
                _ => {
                    let substitute = possible.iter().copied().find(|&c| c != self.base)?;
                    self.pending = Pending::Substitution(substitute);
                    let mut guess = self.working.clone();
                    guess[position] = substitute;
                    return Some(guess.into());
                }
            }
        }
    }

    fn fix(&mut self, position: usize, color: Color, store: &mut ConstraintStore) {
        if color != self.base {
            // The base color was wrong here, so the working guess gains a peg
            self.working[position] = color;
            self.known_exact += 1;
        }
        if let Some((_, count)) = self.remaining.iter_mut().find(|(c, _)| *c == color) {
            *count = count.saturating_sub(1);
        }
        store.confirm(position, color);
        self.position += 1;
        self.tried.clear();
    }
}

/// Alternating arrangements consistent with a two-color multiset
fn alternating_patterns(discovered: &[(Color, usize)], board_length: usize) -> VecDeque<Code> {
    let mut patterns = VecDeque::new();
    let [(a, count_a), (b, count_b)] = discovered else {
        return patterns;
    };
    for (first, first_count, second, second_count) in
        [(*a, *count_a, *b, *count_b), (*b, *count_b, *a, *count_a)]
    {
        if first_count == (board_length + 1) / 2 && second_count == board_length / 2 {
            let pegs: Vec<Color> = (0..board_length)
                .map(|i| if i % 2 == 0 { first } else { second })
                .collect();
            patterns.push_back(pegs.into());
        }
    }
    patterns
}
