use std::collections::BTreeMap;

use mob_core::errors::{ErrorInfo, MobError};
use mob_core::VertexId;
use mob_graph::{Graph, Vertex};
use serde::{Deserialize, Serialize};

use crate::matching::Matching;

/// Bookkeeping emitted alongside a contracted graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractionSummary {
    /// Vertex count of the fine graph.
    pub fine_vertices: usize,
    /// Vertex count of the coarse graph.
    pub coarse_vertices: usize,
    /// Edge count of the fine graph.
    pub fine_edges: usize,
    /// Edge count of the coarse graph after merging parallel edges.
    pub coarse_edges: usize,
    /// Total weight of fine edges that fell inside a single group.
    pub dropped_self_loop_weight: f64,
    /// Vertices removed from each layer.
    pub merges_per_layer: Vec<usize>,
}

/// Coarse graph together with the fine-to-coarse vertex map.
#[derive(Debug, Clone)]
pub struct ContractResult {
    /// The contracted graph.
    pub graph: Graph,
    /// `successor[v]` is the super-vertex that fine vertex `v` was merged into.
    pub successor: Vec<VertexId>,
    /// Counts describing the contraction.
    pub summary: ContractionSummary,
}

fn contraction_error(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
}

/// Contracts every group of `matching` into one super-vertex.
///
/// Super-vertices are numbered densely in order of first appearance by fine
/// vertex id, so layers stay contiguous. A group spanning two layers or a
/// matching of the wrong length is rejected; pairings are range-checked when
/// the [`Matching`] is constructed. The fine graph is not modified and level
/// counters are copied unchanged.
pub fn contract(graph: &Graph, matching: &Matching) -> Result<ContractResult, MobError> {
    let n = graph.vertex_count();
    if matching.len() != n {
        return Err(MobError::Contraction(
            contraction_error("length-mismatch", "matching does not cover every vertex")
                .with_context("matching", matching.len())
                .with_context("vertices", n),
        ));
    }

    let labels = matching.group_labels();
    let mut group_of_label: BTreeMap<VertexId, VertexId> = BTreeMap::new();
    let mut successor = Vec::with_capacity(n);
    let mut members: Vec<Vec<VertexId>> = Vec::new();
    for (v, label) in labels.iter().enumerate() {
        let next = members.len();
        let group = *group_of_label.entry(*label).or_insert(next);
        if group == next {
            members.push(Vec::new());
        }
        members[group].push(v);
        successor.push(group);
    }

    let layers = graph.layers();
    let mut vertices = Vec::with_capacity(members.len());
    let mut vertices_per_layer = vec![0usize; layers];
    for (group, group_members) in members.iter().enumerate() {
        let first = &graph.vertices()[group_members[0]];
        let mut vertex = Vertex {
            layer: first.layer,
            weight: 0.0,
            source: Vec::new(),
            predecessor: Vec::with_capacity(group_members.len()),
        };
        for &member in group_members {
            let fine = &graph.vertices()[member];
            if fine.layer != vertex.layer {
                return Err(MobError::Contraction(
                    contraction_error("mixed-layer-group", "group merges vertices of different layers")
                        .with_context("group", group)
                        .with_context("vertex", member)
                        .with_context("layer", fine.layer)
                        .with_context("expected_layer", vertex.layer)
                        .with_hint("matching strategies must only group vertices of one layer"),
                ));
            }
            vertex.weight += fine.weight;
            vertex.source.extend_from_slice(&fine.source);
            vertex.predecessor.push(member);
        }
        vertices_per_layer[vertex.layer] += 1;
        vertices.push(vertex);
    }

    let mut dropped_self_loop_weight = 0.0;
    let mut coarse_edges = Vec::with_capacity(graph.edge_count());
    for (u, v, weight) in graph.edges() {
        let (cu, cv) = (successor[u], successor[v]);
        if cu == cv {
            dropped_self_loop_weight += weight;
        } else {
            coarse_edges.push((cu, cv, weight));
        }
    }

    let merges_per_layer = graph
        .vertices_per_layer()
        .iter()
        .zip(&vertices_per_layer)
        .map(|(fine, coarse)| fine - coarse)
        .collect();

    let coarse = Graph::from_parts(
        vertices,
        vertices_per_layer,
        graph.level().to_vec(),
        coarse_edges,
    )
    .map_err(|err| match err {
        MobError::Graph(info) => MobError::Contraction(
            ErrorInfo::new("coarse-build", "failed to assemble the coarse graph")
                .with_context("cause", info),
        ),
        other => other,
    })?;

    let summary = ContractionSummary {
        fine_vertices: n,
        coarse_vertices: coarse.vertex_count(),
        fine_edges: graph.edge_count(),
        coarse_edges: coarse.edge_count(),
        dropped_self_loop_weight,
        merges_per_layer,
    };
    Ok(ContractResult {
        graph: coarse,
        successor,
        summary,
    })
}
