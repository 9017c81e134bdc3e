use mob_core::errors::{ErrorInfo, MobError};
use mob_core::rng::RngHandle;
use rand::Rng;

use crate::graph::Graph;

/// Generates a two-layer graph where every left/right pair is joined with probability `p`.
///
/// Edge weights are drawn uniformly from `1..=max_weight` when `max_weight > 1`.
pub fn gen_random_bipartite(
    left: usize,
    right: usize,
    p: f64,
    max_weight: u32,
    rng: &mut RngHandle,
) -> Result<Graph, MobError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(MobError::Graph(
            ErrorInfo::new("invalid-probability", "edge probability must lie in [0, 1]")
                .with_context("p", p),
        ));
    }
    let mut graph = Graph::new(vec![left, right])?;
    for u in 0..left {
        for v in left..left + right {
            if rng.gen_bool(p) {
                let weight = if max_weight > 1 {
                    f64::from(rng.gen_range(1..=max_weight))
                } else {
                    1.0
                };
                graph.add_edge(u, v, weight)?;
            }
        }
    }
    Ok(graph)
}

/// Generates the complete bipartite graph `K(left, right)` with unit weights.
pub fn gen_complete_bipartite(left: usize, right: usize) -> Result<Graph, MobError> {
    let mut graph = Graph::new(vec![left, right])?;
    for u in 0..left {
        for v in left..left + right {
            graph.add_edge(u, v, 1.0)?;
        }
    }
    Ok(graph)
}
