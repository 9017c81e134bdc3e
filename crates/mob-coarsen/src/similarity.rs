//! Pairwise vertex similarity measures.
//!
//! Every measure is defined over degrees, strengths and the intersection of
//! adjacency sets. A pair `(i, i)` and any pair with a zero denominator
//! scores 0.0.

use std::fmt;
use std::str::FromStr;

use mob_core::errors::{ErrorInfo, MobError};
use mob_core::VertexId;
use mob_graph::Graph;
use serde::{Deserialize, Serialize};

/// Scoring function resolved from a [`Similarity`] name.
pub type ScoreFn = fn(&Graph, VertexId, VertexId) -> f64;

/// Named similarity measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Similarity {
    /// Direct edge weight.
    Weight,
    /// `|N(i) ∩ N(j)|`.
    CommonNeighbors,
    /// Mean of the two edge weights to each common neighbor, summed.
    WeightedCommonNeighbors,
    /// `deg(i) · deg(j)`.
    PreferentialAttachment,
    /// Common neighbors over the union of neighbors.
    Jaccard,
    /// Common neighbors over `sqrt(deg(i) · deg(j))`.
    Salton,
    /// Sum of `1 / ln(deg(z))` over common neighbors with `deg(z) > 1`.
    AdamicAdar,
    /// Sum of `1 / deg(z)` over common neighbors.
    ResourceAllocation,
    /// `2 · |CN| / (deg(i) + deg(j))`.
    Sorensen,
    /// Common neighbors over the smaller degree.
    HubPromoted,
    /// Common neighbors over the larger degree.
    HubDepressed,
    /// Common neighbors over `deg(i) · deg(j)`.
    LeichtHolmeNewman,
}

impl Similarity {
    /// Every built-in measure, in declaration order.
    pub const ALL: [Similarity; 12] = [
        Similarity::Weight,
        Similarity::CommonNeighbors,
        Similarity::WeightedCommonNeighbors,
        Similarity::PreferentialAttachment,
        Similarity::Jaccard,
        Similarity::Salton,
        Similarity::AdamicAdar,
        Similarity::ResourceAllocation,
        Similarity::Sorensen,
        Similarity::HubPromoted,
        Similarity::HubDepressed,
        Similarity::LeichtHolmeNewman,
    ];

    /// Configuration name of the measure.
    pub fn name(self) -> &'static str {
        match self {
            Similarity::Weight => "weight",
            Similarity::CommonNeighbors => "common_neighbors",
            Similarity::WeightedCommonNeighbors => "weighted_common_neighbors",
            Similarity::PreferentialAttachment => "preferential_attachment",
            Similarity::Jaccard => "jaccard",
            Similarity::Salton => "salton",
            Similarity::AdamicAdar => "adamic_adar",
            Similarity::ResourceAllocation => "resource_allocation",
            Similarity::Sorensen => "sorensen",
            Similarity::HubPromoted => "hub_promoted",
            Similarity::HubDepressed => "hub_depressed",
            Similarity::LeichtHolmeNewman => "leicht_holme_newman",
        }
    }

    /// Resolves the measure to its scoring function.
    pub fn resolve(self) -> ScoreFn {
        match self {
            Similarity::Weight => weight,
            Similarity::CommonNeighbors => common_neighbors,
            Similarity::WeightedCommonNeighbors => weighted_common_neighbors,
            Similarity::PreferentialAttachment => preferential_attachment,
            Similarity::Jaccard => jaccard,
            Similarity::Salton => salton,
            Similarity::AdamicAdar => adamic_adar,
            Similarity::ResourceAllocation => resource_allocation,
            Similarity::Sorensen => sorensen,
            Similarity::HubPromoted => hub_promoted,
            Similarity::HubDepressed => hub_depressed,
            Similarity::LeichtHolmeNewman => leicht_holme_newman,
        }
    }

    /// Scores the pair `(i, j)`.
    pub fn score(self, graph: &Graph, i: VertexId, j: VertexId) -> f64 {
        (self.resolve())(graph, i, j)
    }
}

impl fmt::Display for Similarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Similarity {
    type Err = MobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Similarity::ALL
            .into_iter()
            .find(|measure| measure.name() == s)
            .ok_or_else(|| {
                MobError::Config(
                    ErrorInfo::new("unknown-method", "unknown similarity measure")
                        .with_context("similarity", s),
                )
            })
    }
}

/// Modularity gain of merging `i` and `j`: `2·sim/S − 2·s_i·s_j/S²`.
///
/// `S` is the total edge weight of the graph; 0.0 when `S` is zero.
pub fn modularity_gain(
    graph: &Graph,
    similarity: ScoreFn,
    i: VertexId,
    j: VertexId,
    total_weight: f64,
) -> f64 {
    if total_weight <= 0.0 || i == j {
        return 0.0;
    }
    let sim = similarity(graph, i, j);
    let expected = graph.strength(i) * graph.strength(j) / (total_weight * total_weight);
    2.0 * sim / total_weight - 2.0 * expected
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn common_count(graph: &Graph, i: VertexId, j: VertexId) -> f64 {
    if i == j {
        return 0.0;
    }
    graph.common_neighbors(i, j).len() as f64
}

fn degrees(graph: &Graph, i: VertexId, j: VertexId) -> (f64, f64) {
    (graph.degree(i) as f64, graph.degree(j) as f64)
}

fn weight(graph: &Graph, i: VertexId, j: VertexId) -> f64 {
    if i == j {
        return 0.0;
    }
    graph.edge_weight(i, j)
}

fn common_neighbors(graph: &Graph, i: VertexId, j: VertexId) -> f64 {
    common_count(graph, i, j)
}

fn weighted_common_neighbors(graph: &Graph, i: VertexId, j: VertexId) -> f64 {
    if i == j {
        return 0.0;
    }
    graph
        .common_neighbors(i, j)
        .into_iter()
        .map(|z| (graph.edge_weight(i, z) + graph.edge_weight(j, z)) / 2.0)
        .sum()
}

fn preferential_attachment(graph: &Graph, i: VertexId, j: VertexId) -> f64 {
    if i == j {
        return 0.0;
    }
    let (di, dj) = degrees(graph, i, j);
    di * dj
}

fn jaccard(graph: &Graph, i: VertexId, j: VertexId) -> f64 {
    let common = common_count(graph, i, j);
    let (di, dj) = degrees(graph, i, j);
    ratio(common, di + dj - common)
}

fn salton(graph: &Graph, i: VertexId, j: VertexId) -> f64 {
    let (di, dj) = degrees(graph, i, j);
    ratio(common_count(graph, i, j), (di * dj).sqrt())
}

fn adamic_adar(graph: &Graph, i: VertexId, j: VertexId) -> f64 {
    if i == j {
        return 0.0;
    }
    graph
        .common_neighbors(i, j)
        .into_iter()
        .map(|z| graph.degree(z))
        .filter(|&degree| degree > 1)
        .map(|degree| 1.0 / (degree as f64).ln())
        .sum()
}

fn resource_allocation(graph: &Graph, i: VertexId, j: VertexId) -> f64 {
    if i == j {
        return 0.0;
    }
    graph
        .common_neighbors(i, j)
        .into_iter()
        .map(|z| 1.0 / graph.degree(z) as f64)
        .sum()
}

fn sorensen(graph: &Graph, i: VertexId, j: VertexId) -> f64 {
    let (di, dj) = degrees(graph, i, j);
    ratio(2.0 * common_count(graph, i, j), di + dj)
}

fn hub_promoted(graph: &Graph, i: VertexId, j: VertexId) -> f64 {
    let (di, dj) = degrees(graph, i, j);
    ratio(common_count(graph, i, j), di.min(dj))
}

fn hub_depressed(graph: &Graph, i: VertexId, j: VertexId) -> f64 {
    let (di, dj) = degrees(graph, i, j);
    ratio(common_count(graph, i, j), di.max(dj))
}

fn leicht_holme_newman(graph: &Graph, i: VertexId, j: VertexId) -> f64 {
    let (di, dj) = degrees(graph, i, j);
    ratio(common_count(graph, i, j), di * dj)
}
