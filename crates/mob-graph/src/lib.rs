#![deny(missing_docs)]
#![doc = "Weighted multi-layer graph model used by the coarsening engine: vertices with layer, weight and lineage, merged undirected edges, a lazily cached adjacency index and neighborhood queries."]

mod edgelist;
mod generators;
mod graph;
mod hash;
mod serialization;

pub use edgelist::{format_edge_list, load_edge_list, parse_edge_list, write_edge_list};
pub use generators::{gen_complete_bipartite, gen_random_bipartite};
pub use graph::{Graph, Vertex};
pub use hash::canonical_hash;
pub use serialization::{graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json};

/// Schema version stamped into every serialized graph.
pub const GRAPH_SCHEMA_VERSION: mob_core::SchemaVersion = mob_core::SchemaVersion::new(1, 0, 0);
