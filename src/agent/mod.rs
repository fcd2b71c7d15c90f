use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::prelude::*;

pub mod cache;
mod evaluate;
pub mod scores;
mod search;

pub use cache::{LeafLookup, ResultCache};
pub use search::Choice;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Node counters for one or more searches.
pub struct SearchStats
{
    /// Interior nodes, whose children were expanded.
    pub stems:   u64,
    /// Leaves, scored without expansion.
    pub leaves:  u64,
    /// Nodes answered from a leaf lookup.
    pub spliced: u64,
}

#[derive(Debug)]
/// An exhaustive minimax searcher with early exits on certain outcomes.
///
/// The searcher owns the random source used to break ties between equally-scored columns.
pub struct Searcher<R: Rng = StdRng>
{
    rng:   R,
    stats: SearchStats,
}

impl Searcher<StdRng>
{
    /// Creates a searcher with a seeded random source, or an entropy-seeded one if no seed is given.
    pub fn seeded(seed: Option<u64>) -> Self
    {
        let rng = match seed
        {
            | Some(seed) => StdRng::seed_from_u64(seed),
            | None => StdRng::from_entropy(),
        };
        Searcher::new(rng)
    }
}

impl<R: Rng> Searcher<R>
{
    /// Creates a searcher over the given random source.
    pub fn new(rng: R) -> Self
    {
        Searcher {
            rng,
            stats: SearchStats::default(),
        }
    }

    /// Returns the counters accumulated since the last reset, and resets them.
    pub fn take_stats(&mut self) -> SearchStats
    {
        std::mem::take(&mut self.stats)
    }

    /// Gets the counters accumulated since the last reset.
    pub fn stats(&self) -> SearchStats
    {
        self.stats
    }
}
