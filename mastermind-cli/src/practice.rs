//! Practice command - tournament against codes read from a file

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use mastermind_core::read_codes;
use mastermind_tournament::Mastermind;

use crate::players::{self, GameArgs};

#[derive(Args)]
pub struct PracticeArgs {
    /// Code file, one code per line
    #[arg(long, value_name = "FILE")]
    pub codes: PathBuf,

    #[command(flatten)]
    pub game: GameArgs,

    /// Distribution name reported to the player (default: file name prefix)
    #[arg(long)]
    pub distribution: Option<String>,

    /// Output JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PracticeArgs) -> Result<()> {
    let mut master = Mastermind::new(args.game.tournament_config())?;
    let codes = read_codes(&args.codes, master.alphabet(), args.game.board_length)?;
    let distribution = match args.distribution {
        Some(name) => name,
        None => distribution_from_path(&args.codes).with_context(|| {
            format!(
                "Cannot infer distribution from {}; pass --distribution",
                args.codes.display()
            )
        })?,
    };

    tracing::info!(
        "Practicing {} codes from {} as {}",
        codes.len(),
        args.codes.display(),
        distribution
    );

    let policy = args.game.load_policy()?;
    let mut guesser = players::make_player(args.game.player, policy.as_ref(), None);
    let report = master.practice_tournament(&mut guesser, &distribution, &codes);

    if args.json {
        players::print_json_report(&report)?;
    } else {
        players::print_text_report(&report);
    }
    Ok(())
}

/// `InsertColors_4_6.txt` -> `InsertColors`
fn distribution_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let name = stem.split('_').next()?;
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_from_path() {
        assert_eq!(
            distribution_from_path(Path::new("codes/FirstLast_30_6.txt")).as_deref(),
            Some("FirstLast")
        );
        assert_eq!(
            distribution_from_path(Path::new("TwoColor.txt")).as_deref(),
            Some("TwoColor")
        );
        assert_eq!(distribution_from_path(Path::new("_4_6.txt")), None);
    }
}
