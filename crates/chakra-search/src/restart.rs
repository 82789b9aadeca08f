// Greedy construction from random starts, restarted until a solution is
// found or the budget runs out

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;

use crate::builder::PathBuilder;
use crate::config::{Deadline, SearchConfig};
use crate::grid::{ToroidalGrid, VertexId};
use crate::search::{PathSearch, SearchOutcome};
use crate::strategy::{ExtensionStrategy, Growth, grow};

/// Restart search over an [`ExtensionStrategy`].
///
/// Attempts run in parallel batches of `batch_size`. Each attempt gets
/// its own `StdRng` seeded by the coordinator, so a fixed seed gives the
/// same result regardless of thread scheduling. The deadline is checked
/// between batches.
pub struct RestartSearch {
    config: SearchConfig,
    strategy: Box<dyn ExtensionStrategy>,
}

struct Attempt {
    path: Vec<VertexId>,
    complete: bool,
}

impl RestartSearch {
    pub fn new(config: SearchConfig, strategy: Box<dyn ExtensionStrategy>) -> Self {
        Self { config, strategy }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn attempt(&self, grid: &ToroidalGrid, seed: u64) -> Attempt {
        let mut rng = StdRng::seed_from_u64(seed);
        let start = rng.gen_range(0..grid.len());
        let mut builder = PathBuilder::new(grid, self.config.limits, self.config.mode, start);
        let growth = grow(&mut builder, self.strategy.as_ref(), &mut rng);
        Attempt {
            complete: growth == Growth::Complete,
            path: builder.into_path(),
        }
    }
}

impl PathSearch for RestartSearch {
    fn search(
        &self,
        grid: &ToroidalGrid,
        rng: &mut StdRng,
        accept: &mut dyn FnMut(&[VertexId]) -> bool,
    ) -> SearchOutcome {
        let deadline = Deadline::after(self.config.timeout);
        let batch_size = self.config.batch_size.max(1);
        let mut attempts = 0;
        let mut best: Vec<VertexId> = Vec::new();

        log::info!(
            "{}: searching {} vertices ({:?}, max {} vowels / {} consonants)",
            self.strategy.name(),
            grid.len(),
            self.config.mode,
            self.config.limits.max_vowels,
            self.config.limits.max_consonants
        );

        while attempts < self.config.max_attempts && !deadline.expired() && !grid.is_empty() {
            let batch = batch_size.min(self.config.max_attempts - attempts);
            let seeds: Vec<u64> = (0..batch).map(|_| rng.next_u64()).collect();
            let results: Vec<Attempt> = seeds
                .par_iter()
                .map(|&seed| self.attempt(grid, seed))
                .collect();

            for (i, result) in results.into_iter().enumerate() {
                if result.complete && accept(&result.path) {
                    return SearchOutcome {
                        path: result.path,
                        complete: true,
                        iterations: attempts + i + 1,
                        elapsed: deadline.elapsed(),
                        strategy: self.strategy.name(),
                    };
                }
                if result.path.len() > best.len() && !result.complete {
                    best = result.path;
                }
            }
            attempts += batch;
            log::debug!(
                "{}: {} attempts, best length {} of {}",
                self.strategy.name(),
                attempts,
                best.len(),
                grid.len()
            );
        }

        SearchOutcome {
            path: best,
            complete: false,
            iterations: attempts,
            elapsed: deadline.elapsed(),
            strategy: self.strategy.name(),
        }
    }

    fn name(&self) -> &'static str {
        self.strategy.name()
    }
}
