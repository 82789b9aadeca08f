//! Constrained Hamiltonian path and cycle search on a toroidal grid.
//!
//! A [`ToroidalGrid`] holds one letter code per cell with 8-neighbour
//! wraparound adjacency. Searches grow self-avoiding walks with a
//! [`PathBuilder`], which enforces the maximum run of consecutive vowels
//! and consonants ([`RunLimits`]) on every step. The choice of the next
//! vertex is delegated to an [`ExtensionStrategy`]; three drivers build
//! on it:
//!
//! - [`RestartSearch`]: repeated greedy construction from random starts
//!   (Warnsdorff or randomized top-k), in parallel batches.
//! - [`GeneticSearch`]: a population of partial paths evolved with
//!   crossover, mutation and local search.
//! - [`Searcher`]: the coordinator that owns the random source and the
//!   set of already reported solutions.
//!
//! Failing to find a complete path is a normal outcome, reported through
//! [`SearchOutcome::complete`].

pub mod builder;
pub mod config;
pub mod constraint;
pub mod genetic;
pub mod grid;
pub mod path;
pub mod restart;
pub mod search;
pub mod strategy;

pub use builder::PathBuilder;
pub use config::{ConfigError, Deadline, GeneticConfig, RandomizedConfig, SearchConfig, SearchMode};
pub use constraint::{RunLimits, RunState};
pub use genetic::GeneticSearch;
pub use grid::{GridError, ToroidalGrid, Vertex, VertexId};
pub use path::{PathKey, PathViolation, SeenPaths, verify_path, verify_solution};
pub use restart::RestartSearch;
pub use search::{ParseStrategyError, PathSearch, SearchOutcome, SearchStrategy, Searcher, build_search, run_search};
pub use strategy::{ExtensionStrategy, Growth, RandomizedWarnsdorff, Warnsdorff};
