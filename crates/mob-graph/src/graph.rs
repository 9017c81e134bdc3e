use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::ops::Range;
use std::sync::OnceLock;

use mob_core::errors::{ErrorInfo, MobError};
use mob_core::{LayerId, VertexId};
use serde::{Deserialize, Serialize};

/// Vertex payload: owning layer, aggregated mass and lineage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Layer (side of the bipartite structure) the vertex belongs to.
    pub layer: LayerId,
    /// Aggregated mass; 1.0 for vertices of a freshly loaded graph.
    pub weight: f64,
    /// Original-graph vertex ids this vertex represents.
    pub source: Vec<VertexId>,
    /// Ids of the vertices of the previous level it was formed from.
    pub predecessor: Vec<VertexId>,
}

impl Vertex {
    /// Creates an original (level 0) vertex that represents only itself.
    pub fn original(id: VertexId, layer: LayerId) -> Self {
        Self {
            layer,
            weight: 1.0,
            source: vec![id],
            predecessor: Vec::new(),
        }
    }
}

type Adjacency = Vec<BTreeMap<VertexId, f64>>;

/// Undirected weighted graph whose vertices are grouped into contiguous layers.
///
/// Vertex ids are dense and layers occupy consecutive id ranges in layer
/// order, so `select(layer)` is a plain range. Edges are stored once under
/// `(min, max)`; inserting an existing pair in either direction adds to its
/// weight. The adjacency index is built on first read and dropped by every
/// structural mutation.
#[derive(Debug, Clone)]
pub struct Graph {
    vertices: Vec<Vertex>,
    vertices_per_layer: Vec<usize>,
    level: Vec<usize>,
    edges: BTreeMap<(VertexId, VertexId), f64>,
    adjacency: OnceLock<Adjacency>,
}

impl Graph {
    /// Creates an edgeless graph with `vertices_per_layer[l]` original vertices in layer `l`.
    pub fn new(vertices_per_layer: Vec<usize>) -> Result<Self, MobError> {
        if vertices_per_layer.is_empty() {
            return Err(graph_error("empty-layers", "a graph needs at least one layer"));
        }
        let mut vertices = Vec::with_capacity(vertices_per_layer.iter().sum());
        for (layer, &count) in vertices_per_layer.iter().enumerate() {
            for _ in 0..count {
                let id = vertices.len();
                vertices.push(Vertex::original(id, layer));
            }
        }
        let level = vec![0; vertices_per_layer.len()];
        Ok(Self {
            vertices,
            vertices_per_layer,
            level,
            edges: BTreeMap::new(),
            adjacency: OnceLock::new(),
        })
    }

    /// Assembles a graph from explicit vertices and weighted edges.
    ///
    /// Vertices must appear in non-decreasing layer order and match
    /// `vertices_per_layer`; `level` must have one entry per layer.
    pub fn from_parts(
        vertices: Vec<Vertex>,
        vertices_per_layer: Vec<usize>,
        level: Vec<usize>,
        edges: impl IntoIterator<Item = (VertexId, VertexId, f64)>,
    ) -> Result<Self, MobError> {
        if vertices_per_layer.is_empty() {
            return Err(graph_error("empty-layers", "a graph needs at least one layer"));
        }
        if level.len() != vertices_per_layer.len() {
            return Err(graph_error("layer-order", "level counters must match the layer count")
                .with_context("levels", level.len())
                .with_context("layers", vertices_per_layer.len()));
        }
        let mut expected = Vec::with_capacity(vertices.len());
        for (layer, &count) in vertices_per_layer.iter().enumerate() {
            expected.extend(std::iter::repeat(layer).take(count));
        }
        if expected.len() != vertices.len() {
            return Err(graph_error(
                "layer-order",
                "vertices_per_layer does not sum to the vertex count",
            )
            .with_context("declared", expected.len())
            .with_context("vertices", vertices.len()));
        }
        for (id, (vertex, layer)) in vertices.iter().zip(&expected).enumerate() {
            if vertex.layer != *layer {
                return Err(
                    graph_error("layer-order", "vertices must be grouped by layer in order")
                        .with_context("vertex", id)
                        .with_context("layer", vertex.layer)
                        .with_context("expected", layer),
                );
            }
        }

        let mut graph = Self {
            vertices,
            vertices_per_layer,
            level,
            edges: BTreeMap::new(),
            adjacency: OnceLock::new(),
        };
        for (u, v, weight) in edges {
            graph.add_edge(u, v, weight)?;
        }
        Ok(graph)
    }

    /// Inserts an undirected edge, summing into an existing `(u, v)` or `(v, u)` entry.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, weight: f64) -> Result<(), MobError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if u == v {
            return Err(graph_error("self-loop", "edge joins a vertex to itself").with_context("vertex", u));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(graph_error("invalid-weight", "edge weight must be finite and non-negative")
                .with_context("u", u)
                .with_context("v", v)
                .with_context("weight", weight));
        }
        *self.edges.entry((u.min(v), u.max(v))).or_insert(0.0) += weight;
        self.adjacency = OnceLock::new();
        Ok(())
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of (merged) undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of layers.
    pub fn layers(&self) -> usize {
        self.vertices_per_layer.len()
    }

    /// Returns the vertex count of every layer.
    pub fn vertices_per_layer(&self) -> &[usize] {
        &self.vertices_per_layer
    }

    /// Returns the per-layer coarsening counters.
    pub fn level(&self) -> &[usize] {
        &self.level
    }

    /// Records one more coarsening round for `layer`.
    pub fn increment_level(&mut self, layer: LayerId) -> Result<(), MobError> {
        let slot = self.level.get_mut(layer).ok_or_else(|| {
            graph_error("unknown-layer", "layer does not exist").with_context("layer", layer)
        })?;
        *slot += 1;
        Ok(())
    }

    /// Returns all vertices in id order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns the payload of a vertex.
    pub fn vertex(&self, v: VertexId) -> Option<&Vertex> {
        self.vertices.get(v)
    }

    /// Returns the layer of a vertex.
    pub fn layer_of(&self, v: VertexId) -> Option<LayerId> {
        self.vertices.get(v).map(|vertex| vertex.layer)
    }

    /// Returns the contiguous id range occupied by `layer`.
    pub fn select(&self, layer: LayerId) -> Result<Range<VertexId>, MobError> {
        if layer >= self.vertices_per_layer.len() {
            return Err(graph_error("unknown-layer", "layer does not exist")
                .with_context("layer", layer)
                .with_context("layers", self.vertices_per_layer.len()));
        }
        let start: usize = self.vertices_per_layer[..layer].iter().sum();
        Ok(start..start + self.vertices_per_layer[layer])
    }

    /// Iterates `(u, v, weight)` with `u < v`, in ascending key order.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId, f64)> + '_ {
        self.edges.iter().map(|(&(u, v), &w)| (u, v, w))
    }

    /// Returns the weight of the edge between `u` and `v`, or 0.0 when absent.
    pub fn edge_weight(&self, u: VertexId, v: VertexId) -> f64 {
        self.edges.get(&(u.min(v), u.max(v))).copied().unwrap_or(0.0)
    }

    /// Returns true when `u` and `v` share an edge.
    pub fn is_adjacent(&self, u: VertexId, v: VertexId) -> bool {
        self.edges.contains_key(&(u.min(v), u.max(v)))
    }

    /// Iterates the neighbors of `v` in ascending id order.
    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency()
            .get(v)
            .into_iter()
            .flat_map(|row| row.keys().copied())
    }

    /// Iterates `(neighbor, weight)` pairs of `v` in ascending neighbor order.
    pub fn incident(&self, v: VertexId) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.adjacency()
            .get(v)
            .into_iter()
            .flat_map(|row| row.iter().map(|(&u, &w)| (u, w)))
    }

    /// Number of distinct neighbors.
    pub fn degree(&self, v: VertexId) -> usize {
        self.adjacency().get(v).map_or(0, BTreeMap::len)
    }

    /// Sum of incident edge weights.
    pub fn strength(&self, v: VertexId) -> f64 {
        self.adjacency()
            .get(v)
            .map_or(0.0, |row| row.values().sum())
    }

    /// Common neighbors of `u` and `v` in ascending order.
    pub fn common_neighbors(&self, u: VertexId, v: VertexId) -> Vec<VertexId> {
        let adjacency = self.adjacency();
        match (adjacency.get(u), adjacency.get(v)) {
            (Some(a), Some(b)) => {
                let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
                small.keys().copied().filter(|z| large.contains_key(z)).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Vertices reachable from `v` within `order` hops, excluding `v`.
    ///
    /// Results are ordered by hop distance, then by id.
    pub fn neighborhood(&self, v: VertexId, order: usize) -> Vec<VertexId> {
        if v >= self.vertices.len() || order == 0 {
            return Vec::new();
        }
        let mut seen = BTreeSet::from([v]);
        let mut frontier = VecDeque::from([(v, 0usize)]);
        let mut rings: Vec<BTreeSet<VertexId>> = vec![BTreeSet::new(); order];
        while let Some((current, distance)) = frontier.pop_front() {
            if distance == order {
                continue;
            }
            for next in self.neighbors(current) {
                if seen.insert(next) {
                    rings[distance].insert(next);
                    frontier.push_back((next, distance + 1));
                }
            }
        }
        rings.into_iter().flatten().collect()
    }

    /// Vertices at exactly two hops from `v`, ascending.
    pub fn two_hops(&self, v: VertexId) -> Vec<VertexId> {
        let mut result = BTreeSet::new();
        for u in self.neighbors(v) {
            for w in self.neighbors(u) {
                if w != v && !self.is_adjacent(v, w) {
                    result.insert(w);
                }
            }
        }
        result.into_iter().collect()
    }

    /// Builds the adjacency index now instead of on first read.
    pub fn build_index(&self) {
        self.adjacency();
    }

    /// Sum of all edge weights.
    pub fn total_edge_weight(&self) -> f64 {
        self.edges.values().sum()
    }

    /// Sum of all vertex weights.
    pub fn total_vertex_weight(&self) -> f64 {
        self.vertices.iter().map(|vertex| vertex.weight).sum()
    }

    fn adjacency(&self) -> &Adjacency {
        self.adjacency.get_or_init(|| {
            let mut rows = vec![BTreeMap::new(); self.vertices.len()];
            for (&(u, v), &w) in &self.edges {
                rows[u].insert(v, w);
                rows[v].insert(u, w);
            }
            rows
        })
    }

    fn check_vertex(&self, v: VertexId) -> Result<(), MobError> {
        if v < self.vertices.len() {
            Ok(())
        } else {
            Err(graph_error("unknown-vertex", "vertex does not exist")
                .with_context("vertex", v)
                .with_context("vertices", self.vertices.len()))
        }
    }
}

fn graph_error(code: impl Into<String>, message: impl Into<String>) -> MobError {
    MobError::Graph(ErrorInfo::new(code, message))
}

trait ContextExt {
    fn with_context(self, key: impl Into<String>, value: impl ToString) -> MobError;
}

impl ContextExt for MobError {
    fn with_context(self, key: impl Into<String>, value: impl ToString) -> MobError {
        match self {
            MobError::Graph(info) => MobError::Graph(info.with_context(key, value.to_string())),
            other => other,
        }
    }
}
