// Search configuration: run limits, mode, budgets and strategy tuning

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::constraint::RunLimits;

/// A strategy setting outside its valid range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a probability in [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },
    #[error("{name} must be a finite non-negative weight, got {value}")]
    Weight { name: &'static str, value: f64 },
    #[error("mutation weights must not all be zero")]
    NoMutation,
}

fn probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Probability { name, value })
    }
}

/// Clamp into `[0, 1]`, mapping NaN to 0.
pub(crate) fn clamp_probability(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn weight(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Weight { name, value })
    }
}

/// Whether a solution must also close into a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Path,
    /// The last vertex must be adjacent to the first, and the wrap edge
    /// must respect the run limits.
    Cycle,
}

/// Budget and constraints shared by every strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub limits: RunLimits,
    pub mode: SearchMode,
    /// Wall-clock budget for one search run.
    pub timeout: Duration,
    /// Maximum construction attempts for restart strategies.
    pub max_attempts: usize,
    /// Fixed seed for reproducible runs. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Restart attempts run in parallel between two deadline checks.
    pub batch_size: usize,
    /// Treat rotations of a cycle as the same solution when deduplicating.
    pub rotation_invariant: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limits: RunLimits::default(),
            mode: SearchMode::Path,
            timeout: Duration::from_secs(120),
            max_attempts: 100_000,
            seed: None,
            batch_size: 64,
            rotation_invariant: false,
        }
    }
}

/// Exploration settings of the randomized restart strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomizedConfig {
    /// Probability of picking among the top-k instead of the best.
    pub explore_probability: f64,
    pub top_k: usize,
}

impl RandomizedConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        probability("explore_probability", self.explore_probability)
    }
}

impl Default for RandomizedConfig {
    fn default() -> Self {
        Self {
            explore_probability: 0.3,
            top_k: 3,
        }
    }
}

/// Parameters of the evolutionary search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    pub population_size: usize,
    pub generations: usize,
    /// Share of the population carried over unchanged (at least one).
    pub elite_fraction: f64,
    /// Probability that an offspring comes from crossover rather than
    /// mutation.
    pub crossover_rate: f64,
    pub tournament_size: usize,
    /// Relative weights of the three mutation operators.
    pub mutation_extend: f64,
    pub mutation_truncate: f64,
    pub mutation_restart: f64,
    /// Probability of the Warnsdorff choice during greedy construction.
    pub greedy_probability: f64,
    /// Probability of the Warnsdorff choice when regrowing a truncated path.
    pub regrow_greedy_probability: f64,
    /// Upper bound on local search steps per offspring.
    pub local_search_budget: usize,
    /// Generations between population refreshes.
    pub refresh_interval: usize,
    /// Share of the population replaced on refresh.
    pub refresh_fraction: f64,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 1000,
            elite_fraction: 0.1,
            crossover_rate: 0.7,
            tournament_size: 5,
            mutation_extend: 0.4,
            mutation_truncate: 0.3,
            mutation_restart: 0.3,
            greedy_probability: 0.9,
            regrow_greedy_probability: 0.8,
            local_search_budget: 20,
            refresh_interval: 50,
            refresh_fraction: 0.1,
        }
    }
}

impl GeneticConfig {
    /// Probabilities and fractions must lie in `[0, 1]`; mutation weights
    /// must be finite, non-negative and not all zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        probability("elite_fraction", self.elite_fraction)?;
        probability("crossover_rate", self.crossover_rate)?;
        probability("greedy_probability", self.greedy_probability)?;
        probability("regrow_greedy_probability", self.regrow_greedy_probability)?;
        probability("refresh_fraction", self.refresh_fraction)?;
        weight("mutation_extend", self.mutation_extend)?;
        weight("mutation_truncate", self.mutation_truncate)?;
        weight("mutation_restart", self.mutation_restart)?;
        if self.mutation_extend + self.mutation_truncate + self.mutation_restart == 0.0 {
            return Err(ConfigError::NoMutation);
        }
        Ok(())
    }

    pub fn elite_count(&self) -> usize {
        ((self.population_size as f64 * self.elite_fraction) as usize)
            .max(1)
            .min(self.population_size)
    }

    pub fn refresh_count(&self) -> usize {
        (self.population_size as f64 * self.refresh_fraction) as usize
    }
}

/// Cooperative wall-clock deadline, polled between units of work.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    limit: Duration,
}

impl Deadline {
    pub fn after(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    pub fn expired(&self) -> bool {
        self.started.elapsed() >= self.limit
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
