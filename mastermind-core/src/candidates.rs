//! Candidate generation
//!
//! Two lazy sources feed the agent's candidate queue:
//! - `Lexicographic`: every code of a given length, leftmost peg most
//!   significant, like an odometer.
//! - `MultisetPermutations`: every distinct arrangement of a multiset
//!   exactly once, produced by descending through per-value remaining
//!   counts and restoring them on backtrack.
//!
//! `SplicedPermutations` wraps the latter so confirmed positions keep
//! their color, and `CandidateQueue` holds whichever source the current
//! phase installed, dropping candidates the constraint store excludes.

use crate::code::{Code, Color};
use crate::constraints::{splice_into, ConstraintStore};

// ============================================================================
// LEXICOGRAPHIC ENUMERATION
// ============================================================================

/// Odometer over all `num_colors^length` codes
#[derive(Clone, Debug)]
pub struct Lexicographic {
    num_colors: usize,
    digits: Vec<usize>,
    done: bool,
}

impl Lexicographic {
    pub fn new(length: usize, num_colors: usize) -> Self {
        Self {
            num_colors,
            digits: vec![0; length],
            done: num_colors == 0 && length > 0,
        }
    }

    fn current(&self) -> Code {
        self.digits
            .iter()
            .map(|&d| Color(d as u8))
            .collect::<Vec<_>>()
            .into()
    }

    /// Step to the next code; false once the odometer rolls over
    fn advance(&mut self) -> bool {
        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if *digit < self.num_colors {
                return true;
            }
            *digit = 0;
        }
        false
    }
}

impl Iterator for Lexicographic {
    type Item = Code;

    fn next(&mut self) -> Option<Code> {
        if self.done {
            return None;
        }
        let code = self.current();
        self.done = !self.advance();
        Some(code)
    }
}

// ============================================================================
// MULTISET PERMUTATIONS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Progress {
    Fresh,
    Running,
    Done,
}

/// Distinct permutations of a multiset, in lexicographic order of first
/// appearance
#[derive(Clone, Debug)]
pub struct MultisetPermutations<T> {
    values: Vec<T>,
    remaining: Vec<usize>,
    chosen: Vec<usize>,
    len: usize,
    progress: Progress,
}

impl<T: Clone + PartialEq> MultisetPermutations<T> {
    /// Permutations of `items`, duplicates collapsed
    pub fn new(items: Vec<T>) -> Self {
        let mut values: Vec<T> = Vec::new();
        let mut remaining = Vec::new();
        for item in items {
            match values.iter().position(|v| *v == item) {
                Some(i) => remaining[i] += 1,
                None => {
                    values.push(item);
                    remaining.push(1);
                }
            }
        }
        Self::build(values, remaining)
    }

    /// Permutations of `value × count` groups; zero counts are skipped
    pub fn from_counts(groups: impl IntoIterator<Item = (T, usize)>) -> Self {
        let (values, remaining): (Vec<T>, Vec<usize>) =
            groups.into_iter().filter(|(_, count)| *count > 0).unzip();
        Self::build(values, remaining)
    }

    fn build(values: Vec<T>, remaining: Vec<usize>) -> Self {
        let len = remaining.iter().sum();
        Self {
            values,
            remaining,
            chosen: Vec::with_capacity(len),
            len,
            progress: Progress::Fresh,
        }
    }

    /// Fill the remaining levels with the lowest available value
    fn descend(&mut self) {
        while self.chosen.len() < self.len {
            match self.remaining.iter().position(|&c| c > 0) {
                Some(j) => {
                    self.remaining[j] -= 1;
                    self.chosen.push(j);
                }
                None => break,
            }
        }
    }

    /// Undo choices until some level can take a larger value
    fn backtrack(&mut self) -> bool {
        while let Some(k) = self.chosen.pop() {
            self.remaining[k] += 1;
            if let Some(j) = (k + 1..self.values.len()).find(|&j| self.remaining[j] > 0) {
                self.remaining[j] -= 1;
                self.chosen.push(j);
                return true;
            }
        }
        false
    }

    fn current(&self) -> Vec<T> {
        self.chosen.iter().map(|&j| self.values[j].clone()).collect()
    }
}

impl<T: Clone + PartialEq> Iterator for MultisetPermutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        match self.progress {
            Progress::Done => return None,
            Progress::Fresh => self.progress = Progress::Running,
            Progress::Running => {
                if !self.backtrack() {
                    self.progress = Progress::Done;
                    return None;
                }
            }
        }
        self.descend();
        Some(self.current())
    }
}

/// Multiset permutations filling the unconfirmed slots of a template
#[derive(Clone, Debug)]
pub struct SplicedPermutations {
    template: Vec<Option<Color>>,
    perms: MultisetPermutations<Color>,
}

impl SplicedPermutations {
    pub fn new(template: Vec<Option<Color>>, perms: MultisetPermutations<Color>) -> Self {
        Self { template, perms }
    }
}

impl Iterator for SplicedPermutations {
    type Item = Code;

    fn next(&mut self) -> Option<Code> {
        self.perms
            .next()
            .map(|free| splice_into(&self.template, &free))
    }
}

// ============================================================================
// CANDIDATE QUEUE
// ============================================================================

/// The candidate source installed by the current phase
#[derive(Clone, Debug, Default)]
pub enum CandidateQueue {
    #[default]
    Empty,
    Enumerate(Lexicographic),
    Permutations(SplicedPermutations),
}

impl CandidateQueue {
    /// Next candidate the store does not exclude
    pub fn next_admissible(&mut self, store: &ConstraintStore) -> Option<Code> {
        self.next_matching(store, |_| true)
    }

    /// Next admissible candidate that `keep` also accepts
    ///
    /// Rejected candidates are consumed.
    pub fn next_matching<P>(&mut self, store: &ConstraintStore, mut keep: P) -> Option<Code>
    where
        P: FnMut(&Code) -> bool,
    {
        let mut accept = |c: &Code| !store.is_excluded(c) && keep(c);
        match self {
            CandidateQueue::Empty => None,
            CandidateQueue::Enumerate(source) => source.find(|c| accept(c)),
            CandidateQueue::Permutations(source) => source.find(|c| accept(c)),
        }
    }

    pub fn clear(&mut self) {
        *self = CandidateQueue::Empty;
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CandidateQueue::Empty)
    }
}

// ============================================================================
// TESTS
// ============================================================================
