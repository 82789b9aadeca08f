// Warnsdorff's rule: move to the candidate with the fewest onward options

use rand::rngs::StdRng;

use super::ExtensionStrategy;
use crate::builder::PathBuilder;
use crate::grid::VertexId;

/// Deterministic Warnsdorff choice. Ties go to the first candidate in
/// neighbour order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Warnsdorff;

impl Warnsdorff {
    pub(crate) fn best(builder: &PathBuilder<'_>, candidates: &[VertexId]) -> VertexId {
        let mut best = candidates[0];
        let mut best_degree = builder.onward_degree(best);
        for &v in &candidates[1..] {
            let degree = builder.onward_degree(v);
            if degree < best_degree {
                best = v;
                best_degree = degree;
            }
        }
        best
    }
}

impl ExtensionStrategy for Warnsdorff {
    fn choose(&self, builder: &PathBuilder<'_>, candidates: &[VertexId], _rng: &mut StdRng) -> VertexId {
        Self::best(builder, candidates)
    }

    fn name(&self) -> &'static str {
        "warnsdorff"
    }
}
