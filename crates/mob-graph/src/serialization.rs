use mob_core::errors::{ErrorInfo, MobError};
use mob_core::provenance::SchemaVersion;
use mob_core::VertexId;
use serde::{Deserialize, Serialize};

use crate::graph::{Graph, Vertex};
use crate::GRAPH_SCHEMA_VERSION;

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes(graph: &Graph) -> Result<Vec<u8>, MobError> {
    let serializable = SerializableGraph::from_graph(graph);
    bincode::serialize(&serializable)
        .map_err(|err| MobError::Serde(ErrorInfo::new("bytes-serialize", err.to_string())))
}

/// Restores a graph from its binary representation.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<Graph, MobError> {
    let serializable: SerializableGraph = bincode::deserialize(bytes)
        .map_err(|err| MobError::Serde(ErrorInfo::new("bytes-deserialize", err.to_string())))?;
    serializable.into_graph()
}

/// Serializes the graph to a JSON string.
pub fn graph_to_json(graph: &Graph) -> Result<String, MobError> {
    let serializable = SerializableGraph::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| MobError::Serde(ErrorInfo::new("json-serialize", err.to_string())))
}

/// Restores a graph from a JSON string.
pub fn graph_from_json(json: &str) -> Result<Graph, MobError> {
    let serializable: SerializableGraph = serde_json::from_str(json)
        .map_err(|err| MobError::Serde(ErrorInfo::new("json-deserialize", err.to_string())))?;
    serializable.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableGraph {
    schema_version: SchemaVersion,
    vertices_per_layer: Vec<usize>,
    level: Vec<usize>,
    vertices: Vec<Vertex>,
    edges: Vec<(VertexId, VertexId, f64)>,
}

impl SerializableGraph {
    fn from_graph(graph: &Graph) -> Self {
        Self {
            schema_version: GRAPH_SCHEMA_VERSION,
            vertices_per_layer: graph.vertices_per_layer().to_vec(),
            level: graph.level().to_vec(),
            vertices: graph.vertices().to_vec(),
            edges: graph.edges().collect(),
        }
    }

    fn into_graph(self) -> Result<Graph, MobError> {
        if !GRAPH_SCHEMA_VERSION.reads(&self.schema_version) {
            return Err(MobError::Serde(
                ErrorInfo::new("schema-version", "unsupported graph schema version")
                    .with_context("found", self.schema_version)
                    .with_context("expected", GRAPH_SCHEMA_VERSION),
            ));
        }
        Graph::from_parts(self.vertices, self.vertices_per_layer, self.level, self.edges)
    }
}
