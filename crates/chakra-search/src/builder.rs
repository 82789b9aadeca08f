// Per-attempt path construction state: order, visited set and run counters

use crate::config::SearchMode;
use crate::constraint::{RunLimits, RunState, leading_run};
use crate::grid::{ToroidalGrid, VertexId};

/// A self-avoiding walk under construction.
///
/// Every path held by a builder satisfies adjacency, no-repeat and the
/// run limits on every prefix. In [`SearchMode::Cycle`] the final vertex
/// is only accepted if it closes the cycle.
///
/// Builders are local to one attempt; parallel workers each own theirs.
#[derive(Debug, Clone)]
pub struct PathBuilder<'g> {
    grid: &'g ToroidalGrid,
    limits: RunLimits,
    mode: SearchMode,
    order: Vec<VertexId>,
    visited: Vec<bool>,
    run: RunState,
}

impl<'g> PathBuilder<'g> {
    /// A one-vertex path at `start`.
    pub fn new(grid: &'g ToroidalGrid, limits: RunLimits, mode: SearchMode, start: VertexId) -> Self {
        let mut visited = vec![false; grid.len()];
        visited[start] = true;
        let mut order = Vec::with_capacity(grid.len());
        order.push(start);
        Self {
            grid,
            limits,
            mode,
            order,
            visited,
            run: RunState::start(grid.class(start)),
        }
    }

    /// Rebuild from an existing path, keeping its longest valid prefix.
    /// Returns `None` for an empty path.
    pub fn from_path(
        grid: &'g ToroidalGrid,
        limits: RunLimits,
        mode: SearchMode,
        path: &[VertexId],
    ) -> Option<Self> {
        let (&start, rest) = path.split_first()?;
        let mut builder = Self::new(grid, limits, mode, start);
        for &v in rest {
            if !builder.try_push(v) {
                break;
            }
        }
        Some(builder)
    }

    pub fn grid(&self) -> &'g ToroidalGrid {
        self.grid
    }

    pub fn limits(&self) -> RunLimits {
        self.limits
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn path(&self) -> &[VertexId] {
        &self.order
    }

    pub fn into_path(self) -> Vec<VertexId> {
        self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn start(&self) -> VertexId {
        self.order[0]
    }

    pub fn tail(&self) -> VertexId {
        self.order[self.order.len() - 1]
    }

    pub fn run(&self) -> RunState {
        self.run
    }

    pub fn is_visited(&self, v: VertexId) -> bool {
        self.visited[v]
    }

    // -- Constraint checks ---------------------------------------------------

    /// Whether `v` may be appended: unvisited, adjacent to the tail, and
    /// within the run limits. In cycle mode the last vertex must also
    /// close the cycle.
    pub fn can_extend(&self, v: VertexId) -> bool {
        if self.visited[v] || !self.grid.is_adjacent(self.tail(), v) {
            return false;
        }
        let next = self.run.advance(self.grid.class(v));
        if !self.limits.allows(next) {
            return false;
        }
        if self.mode == SearchMode::Cycle && self.order.len() + 1 == self.grid.len() {
            return self.wrap_allowed(v, next);
        }
        true
    }

    /// Wrap-edge check for a candidate final vertex with run state `next`.
    fn wrap_allowed(&self, last: VertexId, next: RunState) -> bool {
        wrap_edge_allowed(self.grid, self.limits, &self.order, last, next)
    }

    /// Constraint-valid unvisited neighbours of the tail, in grid order.
    pub fn candidates(&self) -> Vec<VertexId> {
        self.grid
            .neighbors(self.tail())
            .iter()
            .copied()
            .filter(|&v| self.can_extend(v))
            .collect()
    }

    /// Number of unvisited neighbours of `v`.
    pub fn onward_degree(&self, v: VertexId) -> usize {
        self.grid
            .neighbors(v)
            .iter()
            .filter(|&&n| !self.visited[n])
            .count()
    }

    /// Onward degree of the tail; the secondary fitness of a partial path.
    pub fn potential(&self) -> usize {
        self.onward_degree(self.tail())
    }

    // -- Mutation ------------------------------------------------------------

    /// Append `v` if [`can_extend`](Self::can_extend) allows it.
    pub fn try_push(&mut self, v: VertexId) -> bool {
        if !self.can_extend(v) {
            return false;
        }
        self.visited[v] = true;
        self.run = self.run.advance(self.grid.class(v));
        self.order.push(v);
        true
    }

    /// Remove the tail and recompute the run counters from the remaining
    /// suffix. The start vertex is never removed.
    pub fn pop(&mut self) -> Option<VertexId> {
        if self.order.len() <= 1 {
            return None;
        }
        let v = self.order.pop()?;
        self.visited[v] = false;
        self.recompute_run();
        Some(v)
    }

    /// Shorten the path to `len` vertices (at least one).
    pub fn truncate(&mut self, len: usize) {
        let len = len.max(1);
        while self.order.len() > len {
            if let Some(v) = self.order.pop() {
                self.visited[v] = false;
            }
        }
        self.recompute_run();
    }

    fn recompute_run(&mut self) {
        let grid = self.grid;
        self.run = RunState::of_suffix(self.order.iter().map(|&v| grid.class(v)));
    }

    // -- Completion ----------------------------------------------------------

    /// Every vertex visited, and for cycles the wrap edge is valid.
    pub fn is_complete(&self) -> bool {
        self.order.len() == self.grid.len()
            && (self.mode == SearchMode::Path || self.closes_cycle())
    }

    pub fn closes_cycle(&self) -> bool {
        closes_cycle(self.grid, self.limits, &self.order)
    }
}

/// Whether `path` closes into a cycle: the last vertex is adjacent to
/// the first, and the run that crosses the wrap edge stays within limits.
pub fn closes_cycle(grid: &ToroidalGrid, limits: RunLimits, path: &[VertexId]) -> bool {
    let (Some((&last, body)), true) = (path.split_last(), path.len() > 1) else {
        return false;
    };
    let before = RunState::of_suffix(body.iter().map(|&v| grid.class(v)));
    let at_last = before.advance(grid.class(last));
    wrap_edge_allowed(grid, limits, body, last, at_last)
}

/// `prefix` is the path without `last`; `at_last` the run state after it.
fn wrap_edge_allowed(
    grid: &ToroidalGrid,
    limits: RunLimits,
    prefix: &[VertexId],
    last: VertexId,
    at_last: RunState,
) -> bool {
    let Some(&start) = prefix.first() else {
        return false;
    };
    if !grid.is_adjacent(last, start) {
        return false;
    }
    // The trailing run continues into the leading run of the start.
    let (head_class, head_run) = leading_run(prefix.iter().map(|&v| grid.class(v)));
    match limits.max_for(head_class) {
        Some(max) => {
            let joined = at_last.count(head_class) + head_run;
            // A path made of one class only wraps onto itself.
            let joined = joined.min(prefix.len() + 1);
            joined <= max
        }
        None => true,
    }
}
