use sha2::{Digest, Sha256};

use crate::graph::Graph;
use crate::GRAPH_SCHEMA_VERSION;

/// Computes the canonical structural hash for the provided graph.
///
/// Covers layer sizes, level counters, vertex weights with their sorted
/// source lists, and every edge with its weight.
pub fn canonical_hash(graph: &Graph) -> String {
    let mut hasher = Sha256::new();
    hasher.update(GRAPH_SCHEMA_VERSION.major.to_le_bytes());
    hasher.update(GRAPH_SCHEMA_VERSION.minor.to_le_bytes());
    update_slice(graph.vertices_per_layer(), &mut hasher);
    update_slice(graph.level(), &mut hasher);

    hasher.update((graph.vertex_count() as u64).to_le_bytes());
    for vertex in graph.vertices() {
        hasher.update((vertex.layer as u64).to_le_bytes());
        hasher.update(vertex.weight.to_bits().to_le_bytes());
        let mut source = vertex.source.clone();
        source.sort_unstable();
        update_slice(&source, &mut hasher);
    }

    hasher.update((graph.edge_count() as u64).to_le_bytes());
    for (u, v, weight) in graph.edges() {
        hasher.update((u as u64).to_le_bytes());
        hasher.update((v as u64).to_le_bytes());
        hasher.update(weight.to_bits().to_le_bytes());
    }

    format!("{:x}", hasher.finalize())
}

fn update_slice(values: &[usize], hasher: &mut Sha256) {
    hasher.update((values.len() as u64).to_le_bytes());
    for value in values {
        hasher.update((*value as u64).to_le_bytes());
    }
}
