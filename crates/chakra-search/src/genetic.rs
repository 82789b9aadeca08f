// Evolutionary path search: elitism, tournament selection, splice
// crossover, three mutation operators, local search and periodic refresh

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;

use crate::builder::{PathBuilder, closes_cycle};
use crate::config::{Deadline, GeneticConfig, SearchConfig, SearchMode, clamp_probability};
use crate::grid::{ToroidalGrid, VertexId};
use crate::search::{PathSearch, SearchOutcome};
use crate::strategy::{RandomizedWarnsdorff, Warnsdorff, grow, grow_with_backtracking};

/// A candidate path with its secondary fitness.
#[derive(Debug, Clone)]
struct Individual {
    path: Vec<VertexId>,
    /// Unvisited neighbours of the tail.
    potential: usize,
}

impl Individual {
    fn from_builder(builder: PathBuilder<'_>) -> Self {
        let potential = builder.potential();
        Self {
            path: builder.into_path(),
            potential,
        }
    }

    /// Longer first, then more room to grow.
    fn fitness_cmp(&self, other: &Self) -> Ordering {
        self.path
            .len()
            .cmp(&other.path.len())
            .then(self.potential.cmp(&other.potential))
    }
}

/// Genetic search over partial paths.
pub struct GeneticSearch {
    config: SearchConfig,
    genetic: GeneticConfig,
}

impl GeneticSearch {
    pub fn new(config: SearchConfig, genetic: GeneticConfig) -> Self {
        Self { config, genetic }
    }

    fn builder<'g>(&self, grid: &'g ToroidalGrid, start: VertexId) -> PathBuilder<'g> {
        PathBuilder::new(grid, self.config.limits, self.config.mode, start)
    }

    fn rebuild<'g>(&self, grid: &'g ToroidalGrid, path: &[VertexId]) -> Option<PathBuilder<'g>> {
        PathBuilder::from_path(grid, self.config.limits, self.config.mode, path)
    }

    fn is_solution(&self, grid: &ToroidalGrid, path: &[VertexId]) -> bool {
        path.len() == grid.len()
            && (self.config.mode == SearchMode::Path || closes_cycle(grid, self.config.limits, path))
    }

    // -- Construction --------------------------------------------------------

    /// Greedy construction from a random start, mostly Warnsdorff with
    /// occasional uniform choices.
    fn greedy<'g>(&self, grid: &'g ToroidalGrid, rng: &mut StdRng) -> PathBuilder<'g> {
        let start = rng.gen_range(0..grid.len());
        let mut builder = self.builder(grid, start);
        let strategy = RandomizedWarnsdorff::greedy_or_uniform(self.genetic.greedy_probability);
        grow(&mut builder, &strategy, rng);
        builder
    }

    /// Build `count` fresh individuals in parallel, one seed each.
    fn fresh_population(&self, grid: &ToroidalGrid, rng: &mut StdRng, count: usize) -> Vec<Individual> {
        let seeds: Vec<u64> = (0..count).map(|_| rng.next_u64()).collect();
        seeds
            .par_iter()
            .map(|&seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                Individual::from_builder(self.greedy(grid, &mut rng))
            })
            .collect()
    }

    // -- Operators -----------------------------------------------------------

    /// Best of `tournament_size` random picks.
    fn tournament<'p>(&self, population: &'p [Individual], rng: &mut StdRng) -> &'p Individual {
        let mut best = &population[rng.gen_range(0..population.len())];
        for _ in 1..self.genetic.tournament_size {
            let contender = &population[rng.gen_range(0..population.len())];
            if contender.fitness_cmp(best) == Ordering::Greater {
                best = contender;
            }
        }
        best
    }

    /// Splice parent 1's prefix up to a shared vertex with parent 2's
    /// suffix after it. Spliced vertices that break adjacency, repeat, or
    /// exceed the run limits are dropped.
    fn crossover<'g>(
        &self,
        grid: &'g ToroidalGrid,
        p1: &[VertexId],
        p2: &[VertexId],
        rng: &mut StdRng,
    ) -> Option<PathBuilder<'g>> {
        if p1.is_empty() {
            return self.rebuild(grid, p2);
        }
        if p2.is_empty() {
            return self.rebuild(grid, p1);
        }
        let mut position_in_p2 = vec![usize::MAX; grid.len()];
        for (i, &v) in p2.iter().enumerate() {
            position_in_p2[v] = i;
        }
        let common: Vec<(usize, usize)> = p1
            .iter()
            .enumerate()
            .filter(|&(_, &v)| position_in_p2[v] != usize::MAX)
            .map(|(i, &v)| (i, position_in_p2[v]))
            .collect();
        if common.is_empty() {
            let longer = if p1.len() >= p2.len() { p1 } else { p2 };
            return self.rebuild(grid, longer);
        }

        let (cut1, cut2) = common[rng.gen_range(0..common.len())];
        let mut child = self.rebuild(grid, &p1[..=cut1])?;
        for &v in &p2[cut2 + 1..] {
            // Invalid vertices are skipped; later ones may still fit.
            child.try_push(v);
        }
        Some(child)
    }

    fn mutate<'g>(&self, grid: &'g ToroidalGrid, parent: &[VertexId], rng: &mut StdRng) -> Option<PathBuilder<'g>> {
        let g = &self.genetic;
        let total_weight = g.mutation_extend + g.mutation_truncate + g.mutation_restart;
        let roll = rng.gen_range(0.0..1.0) * total_weight;

        if roll < g.mutation_extend {
            let mut child = self.rebuild(grid, parent)?;
            let candidates = child.candidates();
            if !candidates.is_empty() {
                child.try_push(candidates[rng.gen_range(0..candidates.len())]);
            }
            Some(child)
        } else if roll < g.mutation_extend + g.mutation_truncate {
            let mut child = self.rebuild(grid, parent)?;
            let len = child.len();
            if len > 1 {
                let cut = rng.gen_range((len / 2).max(1)..len);
                child.truncate(cut);
            }
            let regrow = RandomizedWarnsdorff::greedy_or_uniform(g.regrow_greedy_probability);
            let budget = grid.len() - child.len() + g.local_search_budget;
            grow_with_backtracking(&mut child, &regrow, rng, budget);
            Some(child)
        } else {
            Some(self.greedy(grid, rng))
        }
    }

    /// Greedy extension with backtracking, bounded by the local search
    /// budget and by the number of unvisited vertices.
    fn local_search(&self, builder: &mut PathBuilder<'_>, rng: &mut StdRng) {
        let remaining = builder.grid().len() - builder.len();
        let budget = self.genetic.local_search_budget.min(remaining);
        grow_with_backtracking(builder, &Warnsdorff, rng, budget);
    }

    /// Replace solutions the caller already rejected with fresh
    /// individuals, so repeats neither survive as elites nor get reported.
    fn drop_repeated_solutions(&self, grid: &ToroidalGrid, population: &mut Vec<Individual>, rng: &mut StdRng) {
        let before = population.len();
        population.retain(|i| !self.is_solution(grid, &i.path));
        let dropped = before - population.len();
        if dropped > 0 {
            log::debug!("genetic: replaced {dropped} repeated solutions");
            population.extend(self.fresh_population(grid, rng, dropped));
            population.sort_by(|a, b| b.fitness_cmp(a));
        }
    }

    /// Keep the longest path in `population` that is not a solution.
    fn record_best(&self, grid: &ToroidalGrid, population: &[Individual], best: &mut Vec<VertexId>) {
        if let Some(top) = population.iter().find(|i| !self.is_solution(grid, &i.path)) {
            if top.path.len() > best.len() {
                *best = top.path.clone();
            }
        }
    }

    /// One offspring from its own seed.
    fn offspring(&self, grid: &ToroidalGrid, population: &[Individual], seed: u64) -> Individual {
        let mut rng = StdRng::seed_from_u64(seed);
        let child = if rng.gen_bool(clamp_probability(self.genetic.crossover_rate)) {
            let p1 = self.tournament(population, &mut rng);
            let p2 = self.tournament(population, &mut rng);
            self.crossover(grid, &p1.path, &p2.path, &mut rng)
        } else {
            let parent = self.tournament(population, &mut rng);
            self.mutate(grid, &parent.path, &mut rng)
        };
        let mut child = child.unwrap_or_else(|| self.greedy(grid, &mut rng));
        self.local_search(&mut child, &mut rng);
        Individual::from_builder(child)
    }
}

impl PathSearch for GeneticSearch {
    fn search(
        &self,
        grid: &ToroidalGrid,
        rng: &mut StdRng,
        accept: &mut dyn FnMut(&[VertexId]) -> bool,
    ) -> SearchOutcome {
        let deadline = Deadline::after(self.config.timeout);
        let population_size = self.genetic.population_size.max(1);
        let total = grid.len();

        let outcome = |path: Vec<VertexId>, complete: bool, generation: usize| SearchOutcome {
            path,
            complete,
            iterations: generation,
            elapsed: deadline.elapsed(),
            strategy: "genetic",
        };

        if grid.is_empty() {
            return outcome(Vec::new(), false, 0);
        }

        log::info!(
            "genetic: population {}, {} generations, {} vertices",
            population_size,
            self.genetic.generations,
            total
        );

        let mut population = self.fresh_population(grid, rng, population_size);
        let mut best: Vec<VertexId> = Vec::new();
        let elite = self.genetic.elite_count().min(population_size);
        let refresh = self.genetic.refresh_count();
        let mut generation = 0;

        while generation < self.genetic.generations && !deadline.expired() {
            population.sort_by(|a, b| b.fitness_cmp(a));

            for individual in &population {
                if self.is_solution(grid, &individual.path) && accept(&individual.path) {
                    log::info!("genetic: solution in generation {generation}");
                    return outcome(individual.path.clone(), true, generation);
                }
            }
            self.drop_repeated_solutions(grid, &mut population, rng);
            self.record_best(grid, &population, &mut best);

            if generation % 10 == 0 {
                let average =
                    population.iter().map(|i| i.path.len()).sum::<usize>() as f64 / population.len() as f64;
                log::debug!(
                    "genetic: generation {generation}, best {} of {total}, average {average:.1}",
                    best.len()
                );
            }

            let seeds: Vec<u64> = (elite..population_size).map(|_| rng.next_u64()).collect();
            let offspring: Vec<Individual> = seeds
                .par_iter()
                .map(|&seed| self.offspring(grid, &population, seed))
                .collect();

            let mut next: Vec<Individual> = population[..elite].to_vec();
            next.extend(offspring);

            let interval = self.genetic.refresh_interval;
            if interval > 0 && generation % interval == interval - 1 && refresh > 0 {
                let keep = next.len().saturating_sub(refresh).max(elite);
                next.truncate(keep);
                let fresh = self.fresh_population(grid, rng, population_size - keep);
                next.extend(fresh);
                log::debug!("genetic: refreshed {} individuals", population_size - keep);
            }

            population = next;
            generation += 1;
        }

        population.sort_by(|a, b| b.fitness_cmp(a));
        for individual in &population {
            if self.is_solution(grid, &individual.path) && accept(&individual.path) {
                return outcome(individual.path.clone(), true, generation);
            }
        }
        self.record_best(grid, &population, &mut best);
        log::info!("genetic: stopped after {generation} generations, best {} of {total}", best.len());
        outcome(best, false, generation)
    }

    fn name(&self) -> &'static str {
        "genetic"
    }
}
