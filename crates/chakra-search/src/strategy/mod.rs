// Extension strategies and the shared growth loops
//
// A strategy only decides which constraint-valid candidate to take next.
// Constraint checking, dead-end detection and backtracking live in the
// loops below and are shared by every driver.

mod randomized;
mod warnsdorff;

pub use randomized::RandomizedWarnsdorff;
pub use warnsdorff::Warnsdorff;

use rand::rngs::StdRng;

use crate::builder::PathBuilder;
use crate::grid::VertexId;

/// Picks the next vertex of a path under construction.
pub trait ExtensionStrategy: Send + Sync {
    /// Choose one of `candidates`, which is non-empty and contains only
    /// vertices the builder accepts.
    fn choose(&self, builder: &PathBuilder<'_>, candidates: &[VertexId], rng: &mut StdRng) -> VertexId;

    /// Short name for logs and reports.
    fn name(&self) -> &'static str;
}

/// How a growth loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Growth {
    /// All vertices visited (and the cycle closed, in cycle mode).
    Complete,
    /// No candidate left, or the step budget ran out.
    DeadEnd,
}

/// Extend greedily until the path is complete or no candidate remains.
pub fn grow(builder: &mut PathBuilder<'_>, strategy: &dyn ExtensionStrategy, rng: &mut StdRng) -> Growth {
    loop {
        if builder.is_complete() {
            return Growth::Complete;
        }
        let candidates = builder.candidates();
        if candidates.is_empty() {
            return Growth::DeadEnd;
        }
        let next = strategy.choose(builder, &candidates, rng);
        builder.try_push(next);
        if builder.len() % 100 == 0 {
            log::trace!("{}: path length {}", strategy.name(), builder.len());
        }
    }
}

/// Extend with backtracking for at most `budget` steps.
///
/// A step either appends a vertex or, at a dead end, removes the tail.
/// The removed vertex is not offered again from the same tail on the
/// next step. The longest path seen is restored at the end, so the
/// result is never shorter than the input.
pub fn grow_with_backtracking(
    builder: &mut PathBuilder<'_>,
    strategy: &dyn ExtensionStrategy,
    rng: &mut StdRng,
    budget: usize,
) -> Growth {
    let mut best: Vec<VertexId> = builder.path().to_vec();
    let mut banned: Option<VertexId> = None;

    for _ in 0..budget {
        if builder.is_complete() {
            return Growth::Complete;
        }
        let mut candidates = builder.candidates();
        if let Some(b) = banned.take() {
            candidates.retain(|&v| v != b);
        }
        if candidates.is_empty() {
            match builder.pop() {
                Some(v) => banned = Some(v),
                None => break,
            }
            continue;
        }
        let next = strategy.choose(builder, &candidates, rng);
        builder.try_push(next);
        if builder.len() > best.len() {
            best.clear();
            best.extend_from_slice(builder.path());
        }
    }

    if builder.is_complete() {
        return Growth::Complete;
    }
    if best.len() > builder.len() {
        let (grid, limits, mode) = (builder.grid(), builder.limits(), builder.mode());
        if let Some(restored) = PathBuilder::from_path(grid, limits, mode, &best) {
            *builder = restored;
        }
    }
    Growth::DeadEnd
}
