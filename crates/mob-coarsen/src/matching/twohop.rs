use std::cmp::Ordering;
use std::ops::Range;

use mob_core::VertexId;
use mob_graph::Graph;
use serde::{Deserialize, Serialize};

/// Sort direction for globally sorted candidate pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreOrder {
    /// Highest score first (similarity-like scores).
    #[default]
    Descending,
    /// Lowest score first (distance-like scores).
    Ascending,
}

fn candidates(graph: &Graph, v: VertexId, range: &Range<VertexId>) -> Vec<VertexId> {
    graph
        .two_hops(v)
        .into_iter()
        .filter(|candidate| range.contains(candidate))
        .collect()
}

fn is_free(slice: &[VertexId], start: VertexId, v: VertexId) -> bool {
    slice[v - start] == v
}

fn commit(slice: &mut [VertexId], start: VertexId, u: VertexId, v: VertexId) {
    slice[u - start] = v;
    slice[v - start] = u;
}

/// Greedy pairing over globally sorted two-hop candidate pairs.
///
/// Each unordered pair is scored once. Pairs are committed in score order
/// (stable, so ties keep ascending `(u, v)` order) while both endpoints are
/// free and the budget lasts. With `positive_only`, pairs scoring `<= 0` are
/// never candidates. Returns the number of committed pairs.
pub fn greedy_pairs(
    graph: &Graph,
    range: Range<VertexId>,
    slice: &mut [VertexId],
    budget: usize,
    order: ScoreOrder,
    positive_only: bool,
    score: impl Fn(VertexId, VertexId) -> f64,
) -> usize {
    if budget == 0 {
        return 0;
    }
    let start = range.start;
    let mut pairs: Vec<(VertexId, VertexId, f64)> = Vec::new();
    for v in range.clone() {
        for u in candidates(graph, v, &range) {
            if u < v {
                continue;
            }
            let value = score(v, u);
            if positive_only && value <= 0.0 {
                continue;
            }
            pairs.push((v, u, value));
        }
    }
    pairs.sort_by(|a, b| match order {
        ScoreOrder::Descending => b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal),
        ScoreOrder::Ascending => a.2.partial_cmp(&b.2).unwrap_or(Ordering::Equal),
    });

    let mut merges = 0;
    for (v, u, _) in pairs {
        if merges == budget {
            break;
        }
        if is_free(slice, start, v) && is_free(slice, start, u) {
            commit(slice, start, v, u);
            merges += 1;
        }
    }
    merges
}

/// Pairs each unvisited seed with its best unvisited two-hop candidate.
///
/// Only candidates with a strictly positive score qualify; ties keep the
/// smallest candidate id. A seed without a qualifying candidate is marked
/// visited and left unmatched. Returns the number of committed pairs.
pub fn seeded_pairs(
    graph: &Graph,
    range: Range<VertexId>,
    slice: &mut [VertexId],
    budget: usize,
    seeds: &[VertexId],
    score: impl Fn(VertexId, VertexId) -> f64,
) -> usize {
    let start = range.start;
    let mut visited = vec![false; range.len()];
    let mut merges = 0;
    for &seed in seeds {
        if merges == budget {
            break;
        }
        if !range.contains(&seed) || visited[seed - start] {
            continue;
        }
        visited[seed - start] = true;

        let mut best: Option<(VertexId, f64)> = None;
        for candidate in candidates(graph, seed, &range) {
            if visited[candidate - start] {
                continue;
            }
            let value = score(seed, candidate);
            if value > best.map_or(0.0, |(_, current)| current) {
                best = Some((candidate, value));
            }
        }
        if let Some((partner, _)) = best {
            visited[partner - start] = true;
            commit(slice, start, seed, partner);
            merges += 1;
        }
    }
    merges
}
