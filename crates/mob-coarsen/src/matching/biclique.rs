use std::collections::BTreeSet;
use std::ops::Range;

use mob_core::{LayerId, VertexId};
use mob_graph::Graph;

use crate::biclique::{find_bicliques, score_biclique, Biclique, BicliqueOpts, BicliquePriority};

/// Smallest and largest layer by vertex count; ties go to the lower index for
/// the smallest and the higher index for the largest.
fn extreme_layers(graph: &Graph) -> Option<(LayerId, LayerId)> {
    if graph.layers() < 2 {
        return None;
    }
    let mut layers: Vec<LayerId> = (0..graph.layers()).collect();
    layers.sort_by_key(|&layer| graph.vertices_per_layer()[layer]);
    Some((layers[0], layers[layers.len() - 1]))
}

fn layer_set(graph: &Graph, layer: LayerId) -> BTreeSet<VertexId> {
    graph.select(layer).map(|range| range.collect()).unwrap_or_default()
}

/// Non-overlapping maximal bicliques between the extreme-size layers, in acceptance order.
///
/// Every maximal biclique meeting the size filter is ranked by the configured
/// priority (stable, descending). Each is then trimmed of already accepted
/// vertices and accepted if both trimmed sides still meet the size filter.
fn accepted_bicliques(graph: &Graph, opts: &BicliqueOpts) -> Vec<Biclique> {
    let Some((small, large)) = extreme_layers(graph) else {
        return Vec::new();
    };
    let search = BicliqueOpts {
        priority: BicliquePriority::All,
        ..*opts
    };
    let mut candidates = find_bicliques(
        graph,
        &layer_set(graph, small),
        &layer_set(graph, large),
        &search,
    );
    for candidate in &mut candidates {
        candidate.score = score_biclique(graph, &candidate.left, &candidate.right, opts.priority);
    }
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut matched = BTreeSet::new();
    let mut accepted = Vec::new();
    for candidate in candidates {
        let left: BTreeSet<VertexId> = candidate.left.difference(&matched).copied().collect();
        let right: BTreeSet<VertexId> = candidate.right.difference(&matched).copied().collect();
        if left.len() < opts.min_size.0.max(1) || right.len() < opts.min_size.1.max(1) {
            continue;
        }
        matched.extend(left.iter().copied());
        matched.extend(right.iter().copied());
        accepted.push(Biclique {
            left,
            right,
            score: candidate.score,
        });
    }
    log::debug!("biclique search accepted {} bicliques", accepted.len());
    accepted
}

fn label_group(
    slice: &mut [VertexId],
    start: VertexId,
    members: &BTreeSet<VertexId>,
) -> usize {
    let Some(&representative) = members.first() else {
        return 0;
    };
    for &member in members {
        slice[member - start] = representative;
    }
    members.len() - 1
}

/// Group labels for every vertex from the whole-graph biclique partition.
///
/// Each accepted biclique contributes one group per side, labelled by its
/// smallest member; every other vertex is its own group.
pub fn biclique_partition(graph: &Graph, opts: &BicliqueOpts) -> Vec<VertexId> {
    let mut labels: Vec<VertexId> = (0..graph.vertex_count()).collect();
    for biclique in accepted_bicliques(graph, opts) {
        label_group(&mut labels, 0, &biclique.left);
        label_group(&mut labels, 0, &biclique.right);
    }
    labels
}

/// Writes the part of the whole-graph biclique partition that falls in `range`.
///
/// Groups are applied in acceptance order; a group that would overrun the
/// remaining budget is skipped. Returns the merges written.
pub fn greedy_biclique(
    graph: &Graph,
    range: Range<VertexId>,
    slice: &mut [VertexId],
    budget: usize,
    opts: &BicliqueOpts,
) -> usize {
    if budget == 0 {
        return 0;
    }
    let mut merges = 0;
    for biclique in accepted_bicliques(graph, opts) {
        for side in [&biclique.left, &biclique.right] {
            let members: BTreeSet<VertexId> =
                side.iter().copied().filter(|v| range.contains(v)).collect();
            if members.len() < 2 || merges + members.len() - 1 > budget {
                continue;
            }
            merges += label_group(slice, range.start, &members);
        }
        if merges == budget {
            break;
        }
    }
    merges
}

/// Seed-local biclique grouping.
///
/// For each unvisited seed the search runs with the seed's unmatched
/// neighbors on the left and its unmatched two-hop neighborhood plus itself
/// on the right. The reported biclique's right side lies in the seed's layer
/// and becomes one group if it fits the remaining budget; all of its vertices
/// are then matched and visited. Returns the merges written.
pub fn greedy_seed_biclique(
    graph: &Graph,
    range: Range<VertexId>,
    slice: &mut [VertexId],
    budget: usize,
    seeds: &[VertexId],
    opts: &BicliqueOpts,
) -> usize {
    let mut matched: BTreeSet<VertexId> = BTreeSet::new();
    let mut merges = 0;
    for &seed in seeds {
        if merges == budget {
            break;
        }
        if !range.contains(&seed) || matched.contains(&seed) {
            continue;
        }
        let left: BTreeSet<VertexId> = graph
            .neighbors(seed)
            .filter(|v| !matched.contains(v))
            .collect();
        let mut right: BTreeSet<VertexId> = graph
            .two_hops(seed)
            .into_iter()
            .filter(|v| range.contains(v) && !matched.contains(v))
            .collect();
        right.insert(seed);
        if left.is_empty() || right.len() < 2 {
            continue;
        }

        let Some(found) = find_bicliques(graph, &left, &right, opts).into_iter().next() else {
            continue;
        };
        if found.right.len() < 2 || merges + found.right.len() - 1 > budget {
            continue;
        }
        merges += label_group(slice, range.start, &found.right);
        matched.extend(found.left.iter().copied());
        matched.extend(found.right.iter().copied());
    }
    merges
}
