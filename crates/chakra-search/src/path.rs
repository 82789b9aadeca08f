// Canonical path keys for duplicate suppression, and path verification

use std::fmt::Write as _;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::builder::closes_cycle;
use crate::config::SearchMode;
use crate::constraint::{RunLimits, RunState};
use crate::grid::{ToroidalGrid, VertexId};

// ---------------------------------------------------------------------------
// Canonical keys
// ---------------------------------------------------------------------------

/// Order-sensitive identity of a path, invariant under reversal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PathKey(String);

impl PathKey {
    /// `"r,c-r,c-..."` of the path or of its reversal, whichever is
    /// lexicographically smaller.
    pub fn canonical(grid: &ToroidalGrid, path: &[VertexId]) -> Self {
        let forward = serialize(grid, path.iter().copied());
        let backward = serialize(grid, path.iter().rev().copied());
        PathKey(forward.min(backward))
    }

    /// Like [`canonical`](Self::canonical), additionally minimised over
    /// every rotation of the cycle.
    pub fn canonical_cycle(grid: &ToroidalGrid, path: &[VertexId]) -> Self {
        let n = path.len();
        let mut best: Option<String> = None;
        for shift in 0..n.max(1) {
            let forward = serialize(grid, path.iter().cycle().skip(shift).take(n).copied());
            let backward = serialize(grid, path.iter().rev().cycle().skip(shift).take(n).copied());
            for candidate in [forward, backward] {
                if best.as_ref().is_none_or(|b| candidate < *b) {
                    best = Some(candidate);
                }
            }
        }
        PathKey(best.unwrap_or_default())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn serialize(grid: &ToroidalGrid, ids: impl Iterator<Item = VertexId>) -> String {
    let mut out = String::new();
    for (i, id) in ids.enumerate() {
        let v = grid.vertex(id);
        if i > 0 {
            out.push('-');
        }
        let _ = write!(out, "{},{}", v.row, v.col);
    }
    out
}

/// Keys of solutions already reported. Only the coordinating thread
/// mutates it.
#[derive(Debug, Default)]
pub struct SeenPaths {
    keys: HashSet<PathKey>,
    rotation_invariant: bool,
}

impl SeenPaths {
    pub fn new(rotation_invariant: bool) -> Self {
        Self {
            keys: HashSet::new(),
            rotation_invariant,
        }
    }

    pub fn key(&self, grid: &ToroidalGrid, path: &[VertexId]) -> PathKey {
        if self.rotation_invariant {
            PathKey::canonical_cycle(grid, path)
        } else {
            PathKey::canonical(grid, path)
        }
    }

    pub fn contains(&self, grid: &ToroidalGrid, path: &[VertexId]) -> bool {
        self.keys.contains(&self.key(grid, path))
    }

    /// Record a path; returns `false` if it was already present.
    pub fn insert(&mut self, grid: &ToroidalGrid, path: &[VertexId]) -> bool {
        let key = self.key(grid, path);
        self.keys.insert(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// The first rule a path breaks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathViolation {
    #[error("path is empty")]
    Empty,

    #[error("vertex id {id} at step {step} is outside the grid")]
    OutOfRange { step: usize, id: VertexId },

    #[error("vertex ({row}, {col}) repeats at step {step}")]
    Repeat { step: usize, row: usize, col: usize },

    #[error("step {step} is not adjacent to the previous vertex")]
    NotAdjacent { step: usize },

    #[error("{run} consecutive vowels at step {step}")]
    VowelRun { step: usize, run: usize },

    #[error("{run} consecutive consonants at step {step}")]
    ConsonantRun { step: usize, run: usize },

    #[error("path visits {visited} of {total} vertices")]
    Incomplete { visited: usize, total: usize },

    #[error("last vertex does not close the cycle")]
    OpenCycle,
}

/// Check adjacency, no repeats and the run limits on every prefix.
pub fn verify_path(
    grid: &ToroidalGrid,
    path: &[VertexId],
    limits: RunLimits,
) -> Result<(), PathViolation> {
    if path.is_empty() {
        return Err(PathViolation::Empty);
    }
    let mut seen = vec![false; grid.len()];
    let mut run = RunState::default();
    for (step, &id) in path.iter().enumerate() {
        if id >= grid.len() {
            return Err(PathViolation::OutOfRange { step, id });
        }
        if seen[id] {
            let v = grid.vertex(id);
            return Err(PathViolation::Repeat {
                step,
                row: v.row,
                col: v.col,
            });
        }
        seen[id] = true;
        if step > 0 && !grid.is_adjacent(path[step - 1], id) {
            return Err(PathViolation::NotAdjacent { step });
        }
        run = run.advance(grid.class(id));
        if run.vowels > limits.max_vowels {
            return Err(PathViolation::VowelRun {
                step,
                run: run.vowels,
            });
        }
        if run.consonants > limits.max_consonants {
            return Err(PathViolation::ConsonantRun {
                step,
                run: run.consonants,
            });
        }
    }
    Ok(())
}

/// [`verify_path`] plus full coverage and, for cycles, closure.
pub fn verify_solution(
    grid: &ToroidalGrid,
    path: &[VertexId],
    limits: RunLimits,
    mode: SearchMode,
) -> Result<(), PathViolation> {
    verify_path(grid, path, limits)?;
    if path.len() != grid.len() {
        return Err(PathViolation::Incomplete {
            visited: path.len(),
            total: grid.len(),
        });
    }
    if mode == SearchMode::Cycle && !closes_cycle(grid, limits, path) {
        return Err(PathViolation::OpenCycle);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid4() -> ToroidalGrid {
        ToroidalGrid::from_flat(&[1; 16]).unwrap()
    }

    #[test]
    fn reversal_has_same_key() {
        let grid = grid4();
        let path = [5, 6, 7, 3];
        let mut reversed = path;
        reversed.reverse();
        assert_eq!(PathKey::canonical(&grid, &path), PathKey::canonical(&grid, &reversed));
        assert_eq!(PathKey::canonical(&grid, &path).as_str(), "0,3-1,3-1,2-1,1");
    }

    #[test]
    fn rotations_differ_unless_requested() {
        let grid = grid4();
        let cycle = [0, 1, 5, 4];
        let rotated = [1, 5, 4, 0];
        assert_ne!(PathKey::canonical(&grid, &cycle), PathKey::canonical(&grid, &rotated));
        assert_eq!(
            PathKey::canonical_cycle(&grid, &cycle),
            PathKey::canonical_cycle(&grid, &rotated)
        );
        let mut reversed = rotated;
        reversed.reverse();
        assert_eq!(
            PathKey::canonical_cycle(&grid, &cycle),
            PathKey::canonical_cycle(&grid, &reversed)
        );
    }

    #[test]
    fn seen_paths_deduplicates() {
        let grid = grid4();
        let mut seen = SeenPaths::new(false);
        assert!(seen.insert(&grid, &[0, 1, 2]));
        assert!(!seen.insert(&grid, &[2, 1, 0]));
        assert!(seen.contains(&grid, &[0, 1, 2]));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn verify_reports_first_violation() {
        let values = [1, 1, 1, 28, 28, 28, 28, 28, 1];
        let grid = ToroidalGrid::from_flat(&values).unwrap();
        let limits = RunLimits::new(2, 3);
        assert_eq!(verify_path(&grid, &[], limits), Err(PathViolation::Empty));
        assert_eq!(
            verify_path(&grid, &[0, 9], limits),
            Err(PathViolation::OutOfRange { step: 1, id: 9 })
        );
        assert!(matches!(
            verify_path(&grid, &[0, 1, 0], limits),
            Err(PathViolation::Repeat { step: 2, .. })
        ));
        assert_eq!(
            verify_path(&grid, &[0, 1, 2], limits),
            Err(PathViolation::VowelRun { step: 2, run: 3 })
        );
        assert_eq!(
            verify_path(&grid, &[3, 4, 5, 6], limits),
            Err(PathViolation::ConsonantRun { step: 3, run: 4 })
        );
        assert!(verify_path(&grid, &[0, 1, 3, 4, 5, 2], limits).is_ok());
    }

    #[test]
    fn verify_detects_non_adjacent_steps() {
        let grid = ToroidalGrid::from_flat(&[1; 25]).unwrap();
        assert_eq!(
            verify_path(&grid, &[0, 12], RunLimits::new(5, 5)),
            Err(PathViolation::NotAdjacent { step: 1 })
        );
    }

    #[test]
    fn solution_requires_full_coverage() {
        let grid = ToroidalGrid::from_rows(&[vec![1, 28], vec![28, 1]]).unwrap();
        let limits = RunLimits::default();
        assert_eq!(
            verify_solution(&grid, &[0, 1], limits, SearchMode::Path),
            Err(PathViolation::Incomplete { visited: 2, total: 4 })
        );
        assert!(verify_solution(&grid, &[0, 1, 3, 2], limits, SearchMode::Path).is_ok());
        assert!(verify_solution(&grid, &[0, 1, 3, 2], limits, SearchMode::Cycle).is_ok());
    }
}
