//! Sweeps of independent tournaments
//!
//! Level 1 - Orchestration. Each tournament gets its own guesser, game
//! master and code RNG, so they can run on separate threads.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use mastermind_core::{CodeError, Distribution, Guesser};

use crate::config::{SweepConfig, TournamentConfig};
use crate::tournament::{Mastermind, TournamentReport};

/// One tournament of a sweep
#[derive(Clone, Debug)]
pub struct SweepEntry {
    pub distribution: Distribution,
    pub report: Result<TournamentReport, CodeError>,
}

/// Run one tournament per distribution
pub fn run_sweep<G, F>(
    distributions: &[Distribution],
    config: &TournamentConfig,
    sweep: &SweepConfig,
    make_guesser: F,
) -> Vec<SweepEntry>
where
    G: Guesser,
    F: Fn() -> G + Sync,
{
    run_sweep_with(distributions, config, sweep, make_guesser, |_| {})
}

/// Like `run_sweep`, calling `on_done` as each tournament finishes
pub fn run_sweep_with<G, F, P>(
    distributions: &[Distribution],
    config: &TournamentConfig,
    sweep: &SweepConfig,
    make_guesser: F,
    on_done: P,
) -> Vec<SweepEntry>
where
    G: Guesser,
    F: Fn() -> G + Sync,
    P: Fn(&SweepEntry) + Sync,
{
    let run_one = |(index, &distribution): (usize, &Distribution)| {
        let entry = run_single(distribution, index, config, sweep, &make_guesser);
        on_done(&entry);
        entry
    };

    if sweep.parallel {
        distributions.par_iter().enumerate().map(run_one).collect()
    } else {
        distributions.iter().enumerate().map(run_one).collect()
    }
}

fn run_single<G, F>(
    distribution: Distribution,
    index: usize,
    config: &TournamentConfig,
    sweep: &SweepConfig,
    make_guesser: &F,
) -> SweepEntry
where
    G: Guesser,
    F: Fn() -> G,
{
    let mut rng = ChaCha8Rng::seed_from_u64(sweep.seed.wrapping_add(index as u64));
    let mut guesser = make_guesser();

    let report = Mastermind::new(config.clone()).and_then(|mut game| {
        game.play_tournament(&mut guesser, distribution, sweep.rounds, &mut rng)
    });
    if let Err(e) = &report {
        tracing::warn!("Skipping {}: {}", distribution, e);
    }

    SweepEntry {
        distribution,
        report,
    }
}
