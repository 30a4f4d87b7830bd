//! Randomized shuffle and pair-swap search
//!
//! Once the color multiset is known, random arrangements of the colors not
//! yet placed are tried until one scores at least `threshold` exact pegs.
//! That arrangement becomes the current best and pairs of its unconfirmed
//! positions are swapped: a change of +2 or -2 pins down both positions.
//! Every time the confirmed count reaches the threshold it rises by two.

use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;

use crate::code::{Code, Color};
use crate::constraints::ConstraintStore;
use crate::retry::RetryBudget;

#[derive(Clone, Debug)]
pub(super) struct ShuffleState {
    /// Colors of the unconfirmed positions, as a multiset
    remaining: Vec<Color>,
    visited: FxHashSet<Code>,
    threshold: usize,
    best: Option<Code>,
    best_exact: usize,
    /// Pairs swapped on the current best without a conclusion
    history: FxHashSet<(usize, usize)>,
    last_swap: Option<(usize, usize)>,
    fruitless: usize,
}

impl ShuffleState {
    pub(super) fn new(discovered: &[(Color, usize)], store: &ConstraintStore) -> Self {
        let remaining = discovered
            .iter()
            .flat_map(|&(color, count)| std::iter::repeat(color).take(count))
            .collect();
        let mut state = Self {
            remaining,
            visited: FxHashSet::default(),
            threshold: (store.board_length() / 4) * 2,
            best: None,
            best_exact: 0,
            history: FxHashSet::default(),
            last_swap: None,
            fruitless: 0,
        };
        state.raise_threshold(store);
        state
    }

    /// Lift the threshold past the confirmed count, two pegs at a time
    fn raise_threshold(&mut self, store: &ConstraintStore) {
        let board_length = store.board_length();
        let mut raised = false;
        while self.threshold <= store.num_confirmed() && self.threshold < board_length {
            self.threshold = (self.threshold + 2).min(board_length);
            raised = true;
        }
        if raised {
            tracing::debug!(
                "Swap threshold now {} ({} confirmed)",
                self.threshold,
                store.num_confirmed()
            );
            self.visited.clear();
        }
    }

    // ========================================================================
    // Shuffling
    // ========================================================================

    /// Random arrangement of the remaining colors around the gauntlet
    ///
    /// Within the retry budget only unvisited admissible arrangements are
    /// accepted; after it the visited set is cleared and any admissible one
    /// will do; after a second budget anything goes.
    pub(super) fn next_shuffle<R: Rng + ?Sized>(&mut self, store: &ConstraintStore, rng: &mut R) -> Code {
        let mut free = self.remaining.clone();
        if store.num_unknown() < 2 {
            return store.splice(&free);
        }

        let mut budget = RetryBudget::for_unknown(store.num_unknown());
        let candidate = loop {
            free.shuffle(rng);
            let candidate = store.splice(&free);
            if !self.visited.contains(&candidate) && !store.is_excluded(&candidate) {
                break candidate;
            }
            if budget.spend() {
                self.visited.clear();
                let mut budget = RetryBudget::for_unknown(store.num_unknown());
                break loop {
                    free.shuffle(rng);
                    let candidate = store.splice(&free);
                    if !store.is_excluded(&candidate) || budget.spend() {
                        break candidate;
                    }
                };
            }
        };

        self.visited.insert(candidate.clone());
        candidate
    }

    /// Rule out what a shuffle proved; true if it is good enough to swap on
    pub(super) fn observe_shuffle(&mut self, guess: &Code, exact: usize, store: &mut ConstraintStore) -> bool {
        if exact <= store.num_confirmed() {
            for position in store.unknown_positions() {
                store.rule_out_color(position, guess[position]);
            }
        }
        if exact >= self.threshold && exact > store.num_confirmed() {
            self.best = Some(guess.clone());
            self.best_exact = exact;
            self.history.clear();
            self.fruitless = 0;
            return true;
        }
        false
    }

    // ========================================================================
    // Swapping
    // ========================================================================

    /// Swap an informative pair of the current best; `None` means go back
    /// to shuffling
    pub(super) fn next_swap<R: Rng + ?Sized>(&mut self, store: &ConstraintStore, rng: &mut R) -> Option<Code> {
        let best = self.best.clone()?;
        let unknown = store.unknown_positions();
        let informative: Vec<(usize, usize)> = unknown
            .iter()
            .enumerate()
            .flat_map(|(k, &i)| unknown[k + 1..].iter().map(move |&j| (i, j)))
            .filter(|&(i, j)| best[i] != best[j])
            .collect();

        if informative.is_empty() || self.fruitless >= informative.len() {
            self.fruitless = 0;
            self.best = None;
            return None;
        }

        let mut budget = RetryBudget::for_unknown(unknown.len());
        let pair = loop {
            let mut picked = unknown.choose_multiple(rng, 2).copied().collect::<Vec<_>>();
            picked.sort_unstable();
            let pair = (picked[0], picked[1]);
            if best[pair.0] != best[pair.1] && !self.history.contains(&pair) {
                break pair;
            }
            if budget.spend() {
                self.history.clear();
                break *informative.choose(rng)?;
            }
        };

        self.last_swap = Some(pair);
        Some(best.swapped(pair.0, pair.1))
    }

    /// Judge the response to the last swap
    pub(super) fn observe_swap(&mut self, exact: usize, store: &mut ConstraintStore) {
        let (Some((i, j)), Some(best)) = (self.last_swap.take(), self.best.clone()) else {
            return;
        };
        let swapped = best.swapped(i, j);

        if exact == self.best_exact + 2 {
            self.resolve(i, swapped[i], store);
            self.resolve(j, swapped[j], store);
            self.best = Some(swapped);
            self.best_exact = exact;
        } else if exact + 2 == self.best_exact {
            self.resolve(i, best[i], store);
            self.resolve(j, best[j], store);
        } else if exact > self.best_exact {
            self.best = Some(swapped);
            self.best_exact = exact;
            self.history.clear();
            self.fruitless = 0;
            return;
        } else {
            self.history.insert((i, j));
            self.fruitless += 1;
            return;
        }

        self.history.clear();
        self.fruitless = 0;
        self.raise_threshold(store);
    }

    /// Whether the current best still clears the threshold
    pub(super) fn keep_swapping(&self) -> bool {
        self.best.is_some() && self.best_exact >= self.threshold
    }

    fn resolve(&mut self, position: usize, color: Color, store: &mut ConstraintStore) {
        if store.confirm(position, color) {
            if let Some(k) = self.remaining.iter().position(|&c| c == color) {
                self.remaining.swap_remove(k);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn code(pegs: &[u8]) -> Code {
        pegs.iter().map(|&p| Color(p)).collect::<Vec<_>>().into()
    }

    #[test]
    fn test_threshold_starts_from_board_length() {
        let store = ConstraintStore::new(8);
        let state = ShuffleState::new(&[(Color(0), 8)], &store);
        assert_eq!(state.threshold, 4);

        // Small boards start above zero
        let store = ConstraintStore::new(3);
        let state = ShuffleState::new(&[(Color(0), 3)], &store);
        assert_eq!(state.threshold, 2);
    }

    #[test]
    fn test_shuffles_keep_multiset_and_avoid_repeats() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let store = ConstraintStore::new(4);
        let mut state = ShuffleState::new(&[(Color(0), 2), (Color(1), 2)], &store);

        let mut seen = FxHashSet::default();
        for _ in 0..4 {
            let guess = state.next_shuffle(&store, &mut rng);
            assert_eq!(guess.color_counts(2), vec![2, 2]);
            seen.insert(guess);
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_zero_exact_shuffle_rules_out() {
        let mut store = ConstraintStore::new(3);
        let mut state = ShuffleState::new(&[(Color(0), 1), (Color(1), 1), (Color(2), 1)], &store);
        assert!(!state.observe_shuffle(&code(&[0, 1, 2]), 0, &mut store));
        assert!(store.is_ruled_out(0, Color(0)));
        assert!(store.is_ruled_out(2, Color(2)));
    }

    #[test]
    fn test_swap_plus_two_confirms_both() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut store = ConstraintStore::new(4);
        // Code BAAB; best ABAB scores 2 exact
        let mut state = ShuffleState::new(&[(Color(0), 2), (Color(1), 2)], &store);
        assert!(state.observe_shuffle(&code(&[0, 1, 0, 1]), 2, &mut store));

        let guess = state.next_swap(&store, &mut rng).unwrap();
        let (i, j) = state.last_swap.unwrap();
        assert_ne!(code(&[0, 1, 0, 1])[i], code(&[0, 1, 0, 1])[j]);
        assert_eq!(guess, code(&[0, 1, 0, 1]).swapped(i, j));

        // Pretend the swap hit both
        state.observe_swap(4, &mut store);
        assert_eq!(store.num_confirmed(), 2);
        assert_eq!(store.confirmed(i), Some(guess[i]));
        assert_eq!(store.confirmed(j), Some(guess[j]));
        assert_eq!(state.remaining.len(), 2);
        assert_eq!(state.threshold, 4);
    }

    #[test]
    fn test_swap_minus_two_confirms_originals() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut store = ConstraintStore::new(4);
        let best = code(&[0, 1, 1, 0]);
        let mut state = ShuffleState::new(&[(Color(0), 2), (Color(1), 2)], &store);
        assert!(state.observe_shuffle(&best, 2, &mut store));

        state.next_swap(&store, &mut rng).unwrap();
        let (i, j) = state.last_swap.unwrap();
        state.observe_swap(0, &mut store);
        assert_eq!(store.confirmed(i), Some(best[i]));
        assert_eq!(store.confirmed(j), Some(best[j]));
    }

    #[test]
    fn test_plus_one_swap_becomes_best() {
        let mut store = ConstraintStore::new(5);
        // Code ABCCD; best ACDCB scores 2 exact
        let discovered = [(Color(0), 1), (Color(1), 1), (Color(2), 2), (Color(3), 1)];
        let mut state = ShuffleState::new(&discovered, &store);
        let best = code(&[0, 2, 3, 2, 1]);
        assert!(state.observe_shuffle(&best, 2, &mut store));

        // On the old best, swapping (2, 4) would only gain one peg
        assert_eq!(score_exact(&best.swapped(2, 4), &code(&[0, 1, 2, 2, 3])), 3);

        // ABDCC gains one peg: nothing is confirmed, but it is the new best
        state.last_swap = Some((1, 4));
        state.observe_swap(3, &mut store);
        assert_eq!(state.best, Some(code(&[0, 1, 3, 2, 2])));
        assert_eq!(state.best_exact, 3);
        assert_eq!(store.num_confirmed(), 0);

        // From the new best the same pair now resolves both positions
        state.last_swap = Some((2, 4));
        state.observe_swap(5, &mut store);
        assert_eq!(store.confirmed(2), Some(Color(2)));
        assert_eq!(store.confirmed(4), Some(Color(3)));
        assert_eq!(state.remaining.len(), 3);
    }

    fn score_exact(guess: &Code, secret: &Code) -> usize {
        crate::feedback::score(guess, secret).0
    }

    #[test]
    fn test_fruitless_swaps_fall_back() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut store = ConstraintStore::new(3);
        let mut state = ShuffleState::new(&[(Color(0), 2), (Color(1), 1)], &store);
        assert!(state.observe_shuffle(&code(&[0, 0, 1]), 2, &mut store));

        // Two informative pairs: (0, 2) and (1, 2)
        for _ in 0..2 {
            state.next_swap(&store, &mut rng).unwrap();
            state.observe_swap(2, &mut store);
        }
        assert!(state.next_swap(&store, &mut rng).is_none());
        assert!(!state.keep_swapping());
    }
}
