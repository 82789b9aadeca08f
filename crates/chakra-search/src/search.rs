// Search drivers behind one interface, and the coordinator that owns the
// random source and the set of already reported solutions.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::config::{ConfigError, GeneticConfig, RandomizedConfig, SearchConfig};
use crate::genetic::GeneticSearch;
use crate::grid::{ToroidalGrid, VertexId};
use crate::path::SeenPaths;
use crate::restart::RestartSearch;
use crate::strategy::{RandomizedWarnsdorff, Warnsdorff};

/// Result of one search run.
///
/// A path shorter than the grid (or `complete == false`) means no
/// solution was found within the budget; it is not an error.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// Best path found, as vertex ids.
    pub path: Vec<VertexId>,
    /// Whether `path` is a full solution in the configured mode.
    pub complete: bool,
    /// Construction attempts (restart) or generations (genetic) used.
    pub iterations: usize,
    pub elapsed: Duration,
    pub strategy: &'static str,
}

impl SearchOutcome {
    /// `(row, col, value)` triples along the path.
    pub fn cells(&self, grid: &ToroidalGrid) -> Vec<(usize, usize, u32)> {
        self.path
            .iter()
            .map(|&id| {
                let v = grid.vertex(id);
                (v.row, v.col, v.value)
            })
            .collect()
    }
}

/// A complete search procedure.
///
/// `accept` is consulted for every complete path before it is returned;
/// rejected paths (duplicates, for instance) do not end the search.
pub trait PathSearch: Send + Sync {
    fn search(
        &self,
        grid: &ToroidalGrid,
        rng: &mut StdRng,
        accept: &mut dyn FnMut(&[VertexId]) -> bool,
    ) -> SearchOutcome;

    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// Strategy selection
// ---------------------------------------------------------------------------

/// Which search procedure a [`Searcher`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    #[default]
    Warnsdorff,
    Randomized,
    Genetic,
}

/// Error for an unrecognized strategy name.
#[derive(Debug, thiserror::Error)]
#[error("unknown search strategy: {0} (expected warnsdorff, randomized or genetic)")]
pub struct ParseStrategyError(pub String);

impl FromStr for SearchStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "warnsdorff" | "greedy" => Ok(SearchStrategy::Warnsdorff),
            "randomized" | "random" => Ok(SearchStrategy::Randomized),
            "genetic" | "ga" => Ok(SearchStrategy::Genetic),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchStrategy::Warnsdorff => "warnsdorff",
            SearchStrategy::Randomized => "randomized",
            SearchStrategy::Genetic => "genetic",
        })
    }
}

/// Build the driver for a strategy, rejecting out-of-range tuning for
/// the strategy selected.
pub fn build_search(
    strategy: SearchStrategy,
    config: &SearchConfig,
    randomized: RandomizedConfig,
    genetic: &GeneticConfig,
) -> Result<Box<dyn PathSearch>, ConfigError> {
    match strategy {
        SearchStrategy::Warnsdorff => {}
        SearchStrategy::Randomized => randomized.validate()?,
        SearchStrategy::Genetic => genetic.validate()?,
    }
    Ok(driver(strategy, config, randomized, genetic))
}

fn driver(
    strategy: SearchStrategy,
    config: &SearchConfig,
    randomized: RandomizedConfig,
    genetic: &GeneticConfig,
) -> Box<dyn PathSearch> {
    match strategy {
        SearchStrategy::Warnsdorff => Box::new(RestartSearch::new(config.clone(), Box::new(Warnsdorff))),
        SearchStrategy::Randomized => Box::new(RestartSearch::new(
            config.clone(),
            Box::new(RandomizedWarnsdorff::from(randomized)),
        )),
        SearchStrategy::Genetic => Box::new(GeneticSearch::new(config.clone(), genetic.clone())),
    }
}

/// One search run with default strategy tuning, seeded from `config`.
pub fn run_search(grid: &ToroidalGrid, config: &SearchConfig, strategy: SearchStrategy) -> SearchOutcome {
    Searcher::with_strategy(grid, config, strategy).run_once()
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

/// Runs a search repeatedly over one grid and reports each solution at
/// most once (a path and its reversal count as the same solution).
pub struct Searcher<'g> {
    grid: &'g ToroidalGrid,
    search: Box<dyn PathSearch>,
    rng: StdRng,
    seen: SeenPaths,
}

impl<'g> Searcher<'g> {
    pub fn new(grid: &'g ToroidalGrid, config: &SearchConfig, search: Box<dyn PathSearch>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            grid,
            search,
            rng,
            seen: SeenPaths::new(config.rotation_invariant),
        }
    }

    /// Convenience constructor with default strategy tuning.
    pub fn with_strategy(grid: &'g ToroidalGrid, config: &SearchConfig, strategy: SearchStrategy) -> Self {
        let search = driver(
            strategy,
            config,
            RandomizedConfig::default(),
            &GeneticConfig::default(),
        );
        Self::new(grid, config, search)
    }

    pub fn grid(&self) -> &'g ToroidalGrid {
        self.grid
    }

    /// Number of distinct solutions reported so far.
    pub fn solutions_found(&self) -> usize {
        self.seen.len()
    }

    /// One run that only accepts solutions not reported before. A
    /// complete outcome has been recorded as seen.
    pub fn next_unique(&mut self) -> SearchOutcome {
        let grid = self.grid;
        let seen = &self.seen;
        let mut accept = |path: &[VertexId]| !seen.contains(grid, path);
        let outcome = self.search.search(grid, &mut self.rng, &mut accept);
        if outcome.complete {
            self.seen.insert(grid, &outcome.path);
            log::info!(
                "{}: solution {} after {} iterations in {:.1?}",
                outcome.strategy,
                self.seen.len(),
                outcome.iterations,
                outcome.elapsed
            );
        } else {
            log::info!(
                "{}: no new solution; best length {} of {}",
                outcome.strategy,
                outcome.path.len(),
                grid.len()
            );
        }
        outcome
    }

    /// One run without duplicate suppression.
    pub fn run_once(&mut self) -> SearchOutcome {
        self.search.search(self.grid, &mut self.rng, &mut |_| true)
    }
}
