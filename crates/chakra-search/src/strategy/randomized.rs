// Warnsdorff with occasional exploration among the top-k candidates

use rand::Rng;
use rand::rngs::StdRng;

use super::{ExtensionStrategy, Warnsdorff};
use crate::builder::PathBuilder;
use crate::config::{RandomizedConfig, clamp_probability};
use crate::grid::VertexId;

/// With probability `explore_probability`, choose uniformly among the
/// `top_k` candidates ranked by onward degree; otherwise take the
/// Warnsdorff choice.
#[derive(Debug, Clone, Copy)]
pub struct RandomizedWarnsdorff {
    pub explore_probability: f64,
    pub top_k: usize,
}

impl RandomizedWarnsdorff {
    pub fn new(explore_probability: f64, top_k: usize) -> Self {
        Self {
            explore_probability: clamp_probability(explore_probability),
            top_k: top_k.max(1),
        }
    }

    /// Warnsdorff with probability `greedy_probability`, otherwise a
    /// uniformly random candidate.
    pub fn greedy_or_uniform(greedy_probability: f64) -> Self {
        Self::new(1.0 - greedy_probability, usize::MAX)
    }
}

impl From<RandomizedConfig> for RandomizedWarnsdorff {
    fn from(config: RandomizedConfig) -> Self {
        Self::new(config.explore_probability, config.top_k)
    }
}

impl Default for RandomizedWarnsdorff {
    fn default() -> Self {
        RandomizedConfig::default().into()
    }
}

impl ExtensionStrategy for RandomizedWarnsdorff {
    fn choose(&self, builder: &PathBuilder<'_>, candidates: &[VertexId], rng: &mut StdRng) -> VertexId {
        if candidates.len() == 1 || !rng.gen_bool(self.explore_probability) {
            return Warnsdorff::best(builder, candidates);
        }
        if self.top_k >= candidates.len() {
            return candidates[rng.gen_range(0..candidates.len())];
        }
        let mut ranked = candidates.to_vec();
        ranked.sort_by_key(|&v| builder.onward_degree(v));
        ranked[rng.gen_range(0..self.top_k)]
    }

    fn name(&self) -> &'static str {
        "randomized"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchMode;
    use crate::constraint::RunLimits;
    use crate::grid::ToroidalGrid;
    use rand::SeedableRng;

    #[test]
    fn never_exploring_matches_warnsdorff() {
        let grid = ToroidalGrid::from_flat(&[1; 25]).unwrap();
        let mut b = PathBuilder::new(&grid, RunLimits::new(25, 25), SearchMode::Path, 0);
        b.try_push(1);
        b.try_push(2);
        let candidates = b.candidates();
        let mut rng = StdRng::seed_from_u64(3);
        let strategy = RandomizedWarnsdorff::new(0.0, 3);
        for _ in 0..10 {
            assert_eq!(
                strategy.choose(&b, &candidates, &mut rng),
                Warnsdorff::best(&b, &candidates)
            );
        }
    }

    #[test]
    fn exploring_stays_within_top_k() {
        let grid = ToroidalGrid::from_flat(&[1; 25]).unwrap();
        let mut b = PathBuilder::new(&grid, RunLimits::new(25, 25), SearchMode::Path, 0);
        b.try_push(1);
        let candidates = b.candidates();
        let mut ranked = candidates.clone();
        ranked.sort_by_key(|&v| b.onward_degree(v));
        let cutoff = b.onward_degree(ranked[1]);

        let strategy = RandomizedWarnsdorff::new(1.0, 2);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let pick = strategy.choose(&b, &candidates, &mut rng);
            assert!(candidates.contains(&pick));
            assert!(b.onward_degree(pick) <= cutoff);
        }
    }

    #[test]
    fn nan_probability_never_explores() {
        let strategy = RandomizedWarnsdorff::new(f64::NAN, 3);
        assert_eq!(strategy.explore_probability, 0.0);
        let strategy = RandomizedWarnsdorff::greedy_or_uniform(f64::NAN);
        assert_eq!(strategy.explore_probability, 0.0);
    }

    #[test]
    fn greedy_or_uniform_explores_everything() {
        let strategy = RandomizedWarnsdorff::greedy_or_uniform(0.9);
        assert!((strategy.explore_probability - 0.1).abs() < 1e-9);
        assert_eq!(strategy.top_k, usize::MAX);
    }
}
