//! Per-position constraint store
//!
//! Tracks, for every peg position, the colors proven absent there
//! (the rule-out sets) and the colors proven present (the gauntlet).
//! A confirmed position carries no exclusions: once solved they are moot.

use rustc_hash::FxHashSet;

use crate::code::{Code, Color};

#[derive(Clone, Debug)]
pub struct ConstraintStore {
    rule_out: Vec<FxHashSet<Color>>,
    gauntlet: Vec<Option<Color>>,
    num_confirmed: usize,
}

impl ConstraintStore {
    pub fn new(board_length: usize) -> Self {
        Self {
            rule_out: vec![FxHashSet::default(); board_length],
            gauntlet: vec![None; board_length],
            num_confirmed: 0,
        }
    }

    pub fn board_length(&self) -> usize {
        self.gauntlet.len()
    }

    /// Record that `color` is absent at `position`
    ///
    /// Confirmed positions are never constrained further.
    pub fn rule_out_color(&mut self, position: usize, color: Color) {
        if self.gauntlet[position].is_none() {
            self.rule_out[position].insert(color);
        }
    }

    /// Rule `color` out at every unconfirmed position
    pub fn rule_out_everywhere(&mut self, color: Color) {
        for position in 0..self.board_length() {
            self.rule_out_color(position, color);
        }
    }

    /// Record that `color` sits at `position`
    ///
    /// Returns true if the position was not confirmed before.
    pub fn confirm(&mut self, position: usize, color: Color) -> bool {
        let newly = self.gauntlet[position].is_none();
        if newly {
            self.num_confirmed += 1;
        }
        self.gauntlet[position] = Some(color);
        self.rule_out[position].clear();
        newly
    }

    /// True if any peg of `candidate` is ruled out at its position
    pub fn is_excluded(&self, candidate: &Code) -> bool {
        candidate
            .iter()
            .zip(&self.rule_out)
            .any(|(color, excluded)| excluded.contains(color))
    }

    pub fn is_ruled_out(&self, position: usize, color: Color) -> bool {
        self.rule_out[position].contains(&color)
    }

    pub fn confirmed(&self, position: usize) -> Option<Color> {
        self.gauntlet[position]
    }

    pub fn gauntlet(&self) -> &[Option<Color>] {
        &self.gauntlet
    }

    pub fn num_confirmed(&self) -> usize {
        self.num_confirmed
    }

    pub fn num_unknown(&self) -> usize {
        self.board_length() - self.num_confirmed
    }

    pub fn is_solved(&self) -> bool {
        self.num_confirmed == self.board_length()
    }

    /// Positions without a confirmed color, in order
    pub fn unknown_positions(&self) -> Vec<usize> {
        self.gauntlet
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Fill the unconfirmed positions, in order, with `free`
    ///
    /// Confirmed positions keep their gauntlet color. Positions left over
    /// when `free` runs short repeat its last color.
    pub fn splice(&self, free: &[Color]) -> Code {
        splice_into(&self.gauntlet, free)
    }

    /// Every unconfirmed position set to `color`
    pub fn fill_unknown(&self, color: Color) -> Code {
        self.gauntlet
            .iter()
            .map(|slot| slot.unwrap_or(color))
            .collect::<Vec<_>>()
            .into()
    }
}

/// Fill the `None` slots of `template` with `free`, in order
pub(crate) fn splice_into(template: &[Option<Color>], free: &[Color]) -> Code {
    let mut free = free.iter();
    let mut last = Color(0);
    template
        .iter()
        .map(|slot| match slot {
            Some(color) => *color,
            None => {
                if let Some(&color) = free.next() {
                    last = color;
                }
                last
            }
        })
        .collect::<Vec<_>>()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn code(pegs: &[u8]) -> Code {
        pegs.iter().map(|&p| Color(p)).collect::<Vec<_>>().into()
    }

    #[test]
    fn test_rule_out_and_exclusion() {
        let mut store = ConstraintStore::new(3);
        store.rule_out_color(1, Color(2));
        assert!(store.is_excluded(&code(&[0, 2, 0])));
        assert!(!store.is_excluded(&code(&[2, 0, 2])));
        assert!(store.is_ruled_out(1, Color(2)));
    }

    #[test]
    fn test_confirm_clears_exclusions() {
        let mut store = ConstraintStore::new(3);
        store.rule_out_everywhere(Color(1));
        assert!(store.confirm(0, Color(0)));
        assert!(!store.is_ruled_out(0, Color(1)));
        assert!(store.is_ruled_out(2, Color(1)));
        assert_eq!(store.num_confirmed(), 1);

        // Confirming again does not count twice
        assert!(!store.confirm(0, Color(0)));
        assert_eq!(store.num_confirmed(), 1);

        // Confirmed positions ignore later exclusions
        store.rule_out_color(0, Color(2));
        assert!(!store.is_ruled_out(0, Color(2)));
    }

    #[test]
    fn test_splice_and_fill() {
        let mut store = ConstraintStore::new(4);
        store.confirm(1, Color(3));
        assert_eq!(store.unknown_positions(), vec![0, 2, 3]);
        assert_eq!(store.splice(&[Color(0), Color(1), Color(2)]), code(&[0, 3, 1, 2]));
        assert_eq!(store.fill_unknown(Color(2)), code(&[2, 3, 2, 2]));
        assert_eq!(store.num_unknown(), 3);
        assert!(!store.is_solved());
    }

    #[test]
    fn test_invariant_after_random_operations() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut store = ConstraintStore::new(6);

        for _ in 0..500 {
            let position = rng.gen_range(0..6);
            let color = Color(rng.gen_range(0..4));
            match rng.gen_range(0..3) {
                0 => store.rule_out_color(position, color),
                1 => store.rule_out_everywhere(color),
                _ => {
                    store.confirm(position, color);
                }
            }

            for position in 0..6 {
                if store.confirmed(position).is_some() {
                    assert!((0..4).all(|c| !store.is_ruled_out(position, Color(c))));
                }
            }
            let confirmed = store.gauntlet().iter().filter(|g| g.is_some()).count();
            assert_eq!(confirmed, store.num_confirmed());
        }
    }
}
