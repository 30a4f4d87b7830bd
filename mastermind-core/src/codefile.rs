//! Pregenerated code files
//!
//! Plain text, one code per line, no header. Files are named
//! `{distribution}_{length}_{colors}.txt`.

use anyhow::Context;
use std::path::{Path, PathBuf};

use crate::code::{Alphabet, Code};

pub fn code_file_name(distribution: &str, length: usize, num_colors: usize) -> String {
    format!("{}_{}_{}.txt", distribution, length, num_colors)
}

/// Write `codes` into `dir`, returning the path of the new file
pub fn write_codes(
    dir: &Path,
    distribution: &str,
    codes: &[Code],
    alphabet: &Alphabet,
    length: usize,
) -> anyhow::Result<PathBuf> {
    let path = dir.join(code_file_name(distribution, length, alphabet.len()));
    let mut content = String::new();
    for code in codes {
        content.push_str(&alphabet.render(code));
        content.push('\n');
    }
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write codes to {}", path.display()))?;
    Ok(path)
}

/// Read codes in file order, skipping blank lines
pub fn read_codes(path: &Path, alphabet: &Alphabet, board_length: usize) -> anyhow::Result<Vec<Code>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read codes from {}", path.display()))?;

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            alphabet
                .parse(line.trim(), board_length)
                .with_context(|| format!("{}:{}: bad code {:?}", path.display(), i + 1, line))
        })
        .collect()
}
