//! Feedback scoring

use serde::{Deserialize, Serialize};

use crate::code::Code;

/// Response to a guess: exact pegs, color-only pegs and guesses made so far
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feedback {
    pub exact: usize,
    pub color_only: usize,
    pub guess_number: usize,
}

impl Feedback {
    pub const fn new(exact: usize, color_only: usize, guess_number: usize) -> Self {
        Self {
            exact,
            color_only,
            guess_number,
        }
    }

    /// The `(0, 0, 0)` feedback handed over with the first guess of a round
    pub const fn initial() -> Self {
        Self::new(0, 0, 0)
    }

    pub fn is_round_start(&self) -> bool {
        self.guess_number == 0
    }

    /// Pegs of the right color, placed or not
    pub fn total(&self) -> usize {
        self.exact + self.color_only
    }
}

/// Score `guess` against `code`, returning `(exact, color_only)`
///
/// Exact pegs are removed from both color tallies before the color-only
/// pegs are counted as the multiset intersection of what is left. Both
/// codes are expected to have the same length; extra pegs are ignored.
pub fn score(guess: &Code, code: &Code) -> (usize, usize) {
    let num_colors = guess
        .iter()
        .chain(code.iter())
        .map(|c| c.index() + 1)
        .max()
        .unwrap_or(0);

    let mut guess_counts = vec![0usize; num_colors];
    let mut code_counts = vec![0usize; num_colors];
    let mut exact = 0;

    for (g, c) in guess.iter().zip(code.iter()) {
        if g == c {
            exact += 1;
        } else {
            guess_counts[g.index()] += 1;
            code_counts[c.index()] += 1;
        }
    }

    let color_only = guess_counts
        .iter()
        .zip(&code_counts)
        .map(|(&g, &c)| g.min(c))
        .sum();

    (exact, color_only)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::Lexicographic;
    use crate::code::Alphabet;

    /// Pairwise greedy matcher used as the reference scorer
    fn brute_force(guess: &Code, code: &Code) -> (usize, usize) {
        let n = guess.len();
        let mut guess_used = vec![false; n];
        let mut code_used = vec![false; n];
        let mut exact = 0;
        for i in 0..n {
            if guess[i] == code[i] {
                exact += 1;
                guess_used[i] = true;
                code_used[i] = true;
            }
        }
        let mut color_only = 0;
        for i in 0..n {
            if guess_used[i] {
                continue;
            }
            for j in 0..n {
                if !code_used[j] && guess[i] == code[j] {
                    code_used[j] = true;
                    color_only += 1;
                    break;
                }
            }
        }
        (exact, color_only)
    }

    fn all_codes(length: usize, colors: usize) -> Vec<Code> {
        Lexicographic::new(length, colors).collect()
    }

    #[test]
    fn test_score_examples() {
        let alphabet = Alphabet::letters(6).unwrap();
        let parse = |s: &str| alphabet.parse(s, s.len()).unwrap();

        assert_eq!(score(&parse("AAAA"), &parse("AABB")), (2, 0));
        assert_eq!(score(&parse("BBBB"), &parse("AABB")), (2, 0));
        assert_eq!(score(&parse("BBAA"), &parse("AABB")), (0, 4));
        assert_eq!(score(&parse("ABCD"), &parse("DCBA")), (0, 4));
        assert_eq!(score(&parse("AABC"), &parse("ABFF")), (1, 1));
        assert_eq!(score(&parse("EEEE"), &parse("ABCD")), (0, 0));
    }

    #[test]
    fn test_score_matches_brute_force() {
        let codes = all_codes(4, 3);
        for guess in &codes {
            for code in &codes {
                assert_eq!(score(guess, code), brute_force(guess, code));
            }
        }
    }

    #[test]
    fn test_score_bounds_and_win() {
        let codes = all_codes(3, 4);
        for guess in &codes {
            for code in &codes {
                let (exact, color_only) = score(guess, code);
                let overlap: usize = guess
                    .color_counts(4)
                    .iter()
                    .zip(code.color_counts(4))
                    .map(|(&g, c)| g.min(c))
                    .sum();
                assert!(exact + color_only <= guess.len());
                assert_eq!(exact + color_only, overlap);
                assert_eq!(exact == guess.len(), guess == code);
            }
        }
    }

    #[test]
    fn test_score_symmetry() {
        let codes = all_codes(3, 3);
        for guess in &codes {
            for code in &codes {
                assert_eq!(score(guess, code), score(code, guess));
            }
        }
    }

    #[test]
    fn test_feedback_helpers() {
        let fb = Feedback::new(2, 1, 4);
        assert_eq!(fb.total(), 3);
        assert!(!fb.is_round_start());
        assert!(Feedback::initial().is_round_start());
        assert_eq!(Feedback::default(), Feedback::initial());
    }
}
