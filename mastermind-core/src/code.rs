//! Color alphabets and peg sequences

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use crate::error::CodeError;

/// Number of capital letters available to `Alphabet::letters`
pub const MAX_LETTERS: usize = 26;

/// Largest alphabet a `Color` index can address
const MAX_COLORS: usize = u8::MAX as usize + 1;

/// A color, stored as its index in the alphabet
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Color(pub u8);

impl Color {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Ordered set of distinct color symbols
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet from distinct symbols, keeping their order
    pub fn new(symbols: Vec<char>) -> Result<Self, CodeError> {
        if symbols.is_empty() {
            return Err(CodeError::EmptyAlphabet);
        }
        if symbols.len() > MAX_COLORS {
            return Err(CodeError::AlphabetTooLarge(symbols.len()));
        }
        for (i, symbol) in symbols.iter().enumerate() {
            if symbols[..i].contains(symbol) {
                return Err(CodeError::DuplicateColor(*symbol));
            }
        }
        Ok(Self { symbols })
    }

    /// The first `count` capital letters, `A` onwards
    pub fn letters(count: usize) -> Result<Self, CodeError> {
        if count > MAX_LETTERS {
            return Err(CodeError::AlphabetTooLarge(count));
        }
        Self::new((b'A'..).take(count).map(char::from).collect())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Color at `index`, if the alphabet is that large
    pub fn color(&self, index: usize) -> Option<Color> {
        (index < self.symbols.len()).then(|| Color(index as u8))
    }

    /// All colors in alphabet order
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        (0..self.symbols.len()).map(|i| Color(i as u8))
    }

    pub fn index_of(&self, symbol: char) -> Option<Color> {
        self.symbols
            .iter()
            .position(|&s| s == symbol)
            .map(|i| Color(i as u8))
    }

    pub fn symbol(&self, color: Color) -> char {
        self.symbols[color.index()]
    }

    /// Parse a guess or code, checking its length and colors
    pub fn parse(&self, text: &str, board_length: usize) -> Result<Code, CodeError> {
        let actual = text.chars().count();
        if actual != board_length {
            return Err(CodeError::InvalidLength {
                expected: board_length,
                actual,
            });
        }
        text.chars()
            .map(|c| self.index_of(c).ok_or(CodeError::UnknownColor(c)))
            .collect::<Result<Vec<_>, _>>()
            .map(Code::new)
    }

    pub fn render(&self, code: &Code) -> String {
        code.iter().map(|&c| self.symbol(c)).collect()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.symbols.iter().collect();
        f.write_str(&text)
    }
}

/// Ordered sequence of pegs
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Code(Vec<Color>);

impl Code {
    pub fn new(pegs: Vec<Color>) -> Self {
        Self(pegs)
    }

    /// Every peg the same color
    pub fn monochrome(color: Color, length: usize) -> Self {
        Self(vec![color; length])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pegs(&self) -> &[Color] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Color> {
        self.0.iter()
    }

    /// Copy of this code with pegs `i` and `j` exchanged
    pub fn swapped(&self, i: usize, j: usize) -> Code {
        let mut pegs = self.0.clone();
        pegs.swap(i, j);
        Code(pegs)
    }

    /// Occurrences of each color, indexed by color
    pub fn color_counts(&self, num_colors: usize) -> Vec<usize> {
        let mut counts = vec![0; num_colors];
        for peg in &self.0 {
            if let Some(slot) = counts.get_mut(peg.index()) {
                *slot += 1;
            }
        }
        counts
    }

    pub fn into_pegs(self) -> Vec<Color> {
        self.0
    }
}

impl From<Vec<Color>> for Code {
    fn from(pegs: Vec<Color>) -> Self {
        Self(pegs)
    }
}

impl Index<usize> for Code {
    type Output = Color;

    fn index(&self, index: usize) -> &Color {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Code {
    type Item = &'a Color;
    type IntoIter = std::slice::Iter<'a, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_alphabet() {
        let alphabet = Alphabet::letters(3).unwrap();
        assert_eq!(alphabet.symbols(), &['A', 'B', 'C']);
        assert_eq!(alphabet.to_string(), "ABC");
        assert!(Alphabet::letters(0).is_err());
        assert_eq!(Alphabet::letters(27), Err(CodeError::AlphabetTooLarge(27)));
    }

    #[test]
    fn test_alphabet_rejects_duplicates() {
        assert_eq!(
            Alphabet::new(vec!['x', 'y', 'x']),
            Err(CodeError::DuplicateColor('x'))
        );
    }

    #[test]
    fn test_parse_and_render() {
        let alphabet = Alphabet::letters(3).unwrap();
        let code = alphabet.parse("CAB", 3).unwrap();
        assert_eq!(code.pegs(), &[Color(2), Color(0), Color(1)]);
        assert_eq!(alphabet.render(&code), "CAB");
    }

    #[test]
    fn test_parse_errors() {
        let alphabet = Alphabet::letters(2).unwrap();
        assert_eq!(
            alphabet.parse("AB", 3),
            Err(CodeError::InvalidLength { expected: 3, actual: 2 })
        );
        assert_eq!(alphabet.parse("ABC", 3), Err(CodeError::UnknownColor('C')));
    }

    #[test]
    fn test_swapped_and_counts() {
        let code = Code::new(vec![Color(0), Color(1), Color(1)]);
        assert_eq!(code.swapped(0, 2).pegs(), &[Color(1), Color(1), Color(0)]);
        assert_eq!(code.color_counts(3), vec![1, 2, 0]);
        assert_eq!(Code::monochrome(Color(2), 2).pegs(), &[Color(2), Color(2)]);
    }
}
