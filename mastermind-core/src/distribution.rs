//! Secret-code distributions
//!
//! Each distribution is a policy for drawing a code of a given length from
//! an alphabet. Names match the ones used in code files and policy tables.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::code::{Alphabet, Code, Color};
use crate::error::CodeError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Distribution {
    /// Uniform random colors
    InsertColors,
    /// Two random colors, both present
    TwoColor,
    /// The first two colors of the alphabet, both present
    ABColor,
    /// Two random colors alternating
    TwoColorAlternating,
    /// No color repeats while the alphabet lasts
    OnlyOnce,
    /// First and last pegs share a color
    FirstLast,
    /// Usually two or three colors
    UsuallyFewer,
    /// Skewed towards very few colors
    PreferFewer,
}

impl Distribution {
    pub const ALL: [Distribution; 8] = [
        Distribution::InsertColors,
        Distribution::TwoColor,
        Distribution::ABColor,
        Distribution::TwoColorAlternating,
        Distribution::OnlyOnce,
        Distribution::FirstLast,
        Distribution::UsuallyFewer,
        Distribution::PreferFewer,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Distribution::InsertColors => "InsertColors",
            Distribution::TwoColor => "TwoColor",
            Distribution::ABColor => "ABColor",
            Distribution::TwoColorAlternating => "TwoColorAlternating",
            Distribution::OnlyOnce => "OnlyOnce",
            Distribution::FirstLast => "FirstLast",
            Distribution::UsuallyFewer => "UsuallyFewer",
            Distribution::PreferFewer => "PreferFewer",
        }
    }

    /// Fewest colors the generator needs
    fn min_colors(&self) -> usize {
        match self {
            Distribution::InsertColors | Distribution::OnlyOnce | Distribution::FirstLast => 1,
            Distribution::TwoColor
            | Distribution::ABColor
            | Distribution::TwoColorAlternating
            | Distribution::PreferFewer => 2,
            Distribution::UsuallyFewer => 3,
        }
    }

    fn unsupported(&self, length: usize, colors: usize) -> CodeError {
        CodeError::UnsupportedDistribution {
            distribution: self.name().to_string(),
            length,
            colors,
        }
    }

    /// Draw one code
    pub fn generate<R: Rng + ?Sized>(
        &self,
        length: usize,
        alphabet: &Alphabet,
        rng: &mut R,
    ) -> Result<Code, CodeError> {
        let palette: Vec<Color> = alphabet.colors().collect();
        if palette.len() < self.min_colors() {
            return Err(self.unsupported(length, palette.len()));
        }

        let pegs = match self {
            Distribution::InsertColors => draw(&palette, length, rng),
            Distribution::TwoColor => {
                let pair: Vec<Color> = palette.choose_multiple(rng, 2).copied().collect();
                self.both_present(&pair, length, rng)?
            }
            Distribution::ABColor => self.both_present(&palette[..2], length, rng)?,
            Distribution::TwoColorAlternating => {
                let pair: Vec<Color> = palette.choose_multiple(rng, 2).copied().collect();
                (0..length).map(|i| pair[i % 2]).collect()
            }
            Distribution::OnlyOnce => {
                let distinct = length.min(palette.len());
                let mut pegs: Vec<Color> =
                    palette.choose_multiple(rng, distinct).copied().collect();
                pegs.extend(draw(&palette, length - distinct, rng));
                pegs
            }
            Distribution::FirstLast => {
                let mut pegs = draw(&palette, length, rng);
                if length >= 2 {
                    pegs[length - 1] = pegs[0];
                }
                pegs
            }
            Distribution::UsuallyFewer => {
                let picked: Vec<Color> = if rng.gen_range(0..=100) < 90 {
                    let count = rng.gen_range(2..=3);
                    palette.choose_multiple(rng, count).copied().collect()
                } else {
                    palette.clone()
                };
                draw(&picked, length, rng)
            }
            Distribution::PreferFewer => {
                let count = match rng.gen_range(0..=100) {
                    0..=49 => 1,
                    50..=74 => 2,
                    75..=87 => 3,
                    88..=95 => 4,
                    96..=98 => 5,
                    _ => palette.len(),
                };
                let count = count.min(palette.len());
                let picked: Vec<Color> = palette.choose_multiple(rng, count).copied().collect();
                draw(&picked, length, rng)
            }
        };
        Ok(Code::new(pegs))
    }

    /// Draw `count` codes
    pub fn generate_many<R: Rng + ?Sized>(
        &self,
        length: usize,
        alphabet: &Alphabet,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Code>, CodeError> {
        (0..count)
            .map(|_| self.generate(length, alphabet, rng))
            .collect()
    }

    /// Random pegs from `pair`, each color at least once
    fn both_present<R: Rng + ?Sized>(
        &self,
        pair: &[Color],
        length: usize,
        rng: &mut R,
    ) -> Result<Vec<Color>, CodeError> {
        if length < 2 {
            return Err(self.unsupported(length, pair.len()));
        }
        let mut pegs = draw(pair, length, rng);
        let spots = rand::seq::index::sample(rng, length, 2);
        pegs[spots.index(0)] = pair[0];
        pegs[spots.index(1)] = pair[1];
        Ok(pegs)
    }
}

fn draw<R: Rng + ?Sized>(palette: &[Color], length: usize, rng: &mut R) -> Vec<Color> {
    (0..length)
        .filter_map(|_| palette.choose(rng).copied())
        .collect()
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Distribution {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Distribution::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CodeError::UnknownDistribution(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rustc_hash::FxHashSet;

    fn distinct(code: &Code) -> usize {
        code.iter().collect::<FxHashSet<_>>().len()
    }

    #[test]
    fn test_name_round_trip() {
        for distribution in Distribution::ALL {
            assert_eq!(distribution.name().parse::<Distribution>(), Ok(distribution));
        }
        assert_eq!("abcolor".parse::<Distribution>(), Ok(Distribution::ABColor));
        assert!("Mystery".parse::<Distribution>().is_err());
    }

    #[test]
    fn test_every_distribution_has_right_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let alphabet = Alphabet::letters(6).unwrap();
        for distribution in Distribution::ALL {
            for code in distribution.generate_many(7, &alphabet, 20, &mut rng).unwrap() {
                assert_eq!(code.len(), 7, "{}", distribution);
                assert!(code.iter().all(|c| c.index() < 6));
            }
        }
    }

    #[test]
    fn test_two_color_families() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let alphabet = Alphabet::letters(6).unwrap();
        for _ in 0..50 {
            let code = Distribution::TwoColor.generate(5, &alphabet, &mut rng).unwrap();
            assert_eq!(distinct(&code), 2);

            let code = Distribution::ABColor.generate(5, &alphabet, &mut rng).unwrap();
            assert_eq!(distinct(&code), 2);
            assert!(code.iter().all(|c| c.index() < 2));

            let code = Distribution::TwoColorAlternating.generate(5, &alphabet, &mut rng).unwrap();
            assert!(code.iter().zip(code.iter().skip(2)).all(|(a, b)| a == b));
            assert_ne!(code[0], code[1]);
        }
    }

    #[test]
    fn test_only_once_and_first_last() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let alphabet = Alphabet::letters(6).unwrap();
        for _ in 0..50 {
            let code = Distribution::OnlyOnce.generate(5, &alphabet, &mut rng).unwrap();
            assert_eq!(distinct(&code), 5);

            // Longer than the alphabet: the first six are still distinct
            let code = Distribution::OnlyOnce.generate(9, &alphabet, &mut rng).unwrap();
            assert_eq!(distinct(&Code::new(code.pegs()[..6].to_vec())), 6);

            let code = Distribution::FirstLast.generate(5, &alphabet, &mut rng).unwrap();
            assert_eq!(code[0], code[4]);
        }
    }

    #[test]
    fn test_fewer_color_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let alphabet = Alphabet::letters(8).unwrap();
        let mut monochrome = 0;
        for _ in 0..200 {
            let code = Distribution::PreferFewer.generate(10, &alphabet, &mut rng).unwrap();
            if distinct(&code) == 1 {
                monochrome += 1;
            }
            let code = Distribution::UsuallyFewer.generate(10, &alphabet, &mut rng).unwrap();
            assert!(distinct(&code) <= 8);
        }
        // About half of PreferFewer codes use a single color
        assert!(monochrome > 60 && monochrome < 140, "{}", monochrome);
    }

    #[test]
    fn test_unsupported_requests() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let one = Alphabet::letters(1).unwrap();
        let two = Alphabet::letters(2).unwrap();

        assert!(matches!(
            Distribution::TwoColor.generate(4, &one, &mut rng),
            Err(CodeError::UnsupportedDistribution { .. })
        ));
        assert!(Distribution::UsuallyFewer.generate(4, &two, &mut rng).is_err());
        assert!(Distribution::ABColor.generate(1, &two, &mut rng).is_err());
        assert!(Distribution::InsertColors.generate(4, &one, &mut rng).is_ok());
    }
}
