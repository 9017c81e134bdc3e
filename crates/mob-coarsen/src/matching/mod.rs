//! Matching strategies and the matching array they produce.
//!
//! A strategy reads the graph and writes only the sub-slice of the matching
//! array that covers its layer. Entry `k` of a slice describes vertex
//! `range.start + k`, and every entry starts out as the identity.

mod biclique;
mod seed;
mod twohop;

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use mob_core::errors::{ErrorInfo, MobError};
use mob_core::rng::RngHandle;
use mob_core::{LayerId, VertexId};
use mob_graph::Graph;
use serde::{Deserialize, Serialize};

use crate::biclique::BicliqueOpts;
use crate::similarity::{modularity_gain, Similarity};

pub use biclique::{biclique_partition, greedy_biclique, greedy_seed_biclique};
pub use seed::{seed_order, SeedPriority};
pub use twohop::{greedy_pairs, seeded_pairs, ScoreOrder};

/// Named matching strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMethod {
    /// Globally sorted greedy pairing over two-hop candidates.
    GreedyTwohops,
    /// Per-seed best two-hop partner.
    GreedySeedTwohops,
    /// Globally sorted greedy pairing by positive modularity gain.
    GreedyModularity,
    /// Per-seed best partner by positive modularity gain.
    GreedySeedModularity,
    /// Non-overlapping maximal bicliques between the extreme-size layers.
    GreedyBiclique,
    /// Seed-local maximal bicliques.
    GreedySeedBiclique,
}

impl MatchingMethod {
    /// Every strategy, in declaration order.
    pub const ALL: [MatchingMethod; 6] = [
        MatchingMethod::GreedyTwohops,
        MatchingMethod::GreedySeedTwohops,
        MatchingMethod::GreedyModularity,
        MatchingMethod::GreedySeedModularity,
        MatchingMethod::GreedyBiclique,
        MatchingMethod::GreedySeedBiclique,
    ];

    /// Configuration name of the strategy.
    pub fn name(self) -> &'static str {
        match self {
            MatchingMethod::GreedyTwohops => "greedy_twohops",
            MatchingMethod::GreedySeedTwohops => "greedy_seed_twohops",
            MatchingMethod::GreedyModularity => "greedy_modularity",
            MatchingMethod::GreedySeedModularity => "greedy_seed_modularity",
            MatchingMethod::GreedyBiclique => "greedy_biclique",
            MatchingMethod::GreedySeedBiclique => "greedy_seed_biclique",
        }
    }

    /// Representation the strategy writes.
    pub fn form(self) -> MatchingForm {
        match self {
            MatchingMethod::GreedyBiclique | MatchingMethod::GreedySeedBiclique => {
                MatchingForm::Grouping
            }
            _ => MatchingForm::Pairing,
        }
    }
}

impl fmt::Display for MatchingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MatchingMethod {
    type Err = MobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MatchingMethod::ALL
            .into_iter()
            .find(|method| method.name() == s)
            .ok_or_else(|| {
                MobError::Config(
                    ErrorInfo::new("unknown-method", "unknown matching strategy")
                        .with_context("matching", s),
                )
            })
    }
}

/// Representation of a matching array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingForm {
    /// `m[v] == v` is unmatched, `m[v] == u` pairs `v` with `u`, symmetric.
    Pairing,
    /// `m[v]` is a group label shared by every member of the group.
    Grouping,
}

/// A matching over every vertex of a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    form: MatchingForm,
    labels: Vec<VertexId>,
}

impl Matching {
    /// The identity pairing: every vertex unmatched.
    pub fn identity(vertex_count: usize) -> Self {
        Self {
            form: MatchingForm::Pairing,
            labels: (0..vertex_count).collect(),
        }
    }

    /// Wraps a pairing array after checking symmetry.
    pub fn pairing(labels: Vec<VertexId>) -> Result<Self, MobError> {
        validate_pairing(&labels, 0)?;
        Ok(Self {
            form: MatchingForm::Pairing,
            labels,
        })
    }

    /// Wraps a grouping array; labels are arbitrary.
    pub fn grouping(labels: Vec<VertexId>) -> Self {
        Self {
            form: MatchingForm::Grouping,
            labels,
        }
    }

    /// Representation of the array.
    pub fn form(&self) -> MatchingForm {
        self.form
    }

    /// Raw array.
    pub fn labels(&self) -> &[VertexId] {
        &self.labels
    }

    /// Number of vertices covered.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true when the matching covers no vertex.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Group label of every vertex; a pair is labelled by its smaller id.
    pub fn group_labels(&self) -> Vec<VertexId> {
        match self.form {
            MatchingForm::Pairing => self
                .labels
                .iter()
                .enumerate()
                .map(|(v, &partner)| v.min(partner))
                .collect(),
            MatchingForm::Grouping => self.labels.clone(),
        }
    }

    /// Number of vertices that disappear when the matching is contracted.
    pub fn merges(&self) -> usize {
        let groups: std::collections::BTreeSet<VertexId> =
            self.group_labels().into_iter().collect();
        self.labels.len() - groups.len()
    }
}

/// Checks that a pairing slice starting at vertex `offset` is symmetric and stays inside it.
pub fn validate_pairing(slice: &[VertexId], offset: VertexId) -> Result<(), MobError> {
    let range = offset..offset + slice.len();
    for (k, &partner) in slice.iter().enumerate() {
        let v = offset + k;
        if !range.contains(&partner) {
            return Err(MobError::Matching(
                ErrorInfo::new("foreign-partner", "pairing references a vertex outside its range")
                    .with_context("vertex", v)
                    .with_context("partner", partner),
            ));
        }
        if slice[partner - offset] != v {
            return Err(MobError::Matching(
                ErrorInfo::new("asymmetric-pairing", "pairing is not symmetric")
                    .with_context("vertex", v)
                    .with_context("partner", partner)
                    .with_context("partner_of_partner", slice[partner - offset]),
            ));
        }
    }
    Ok(())
}

/// Per-layer parameters handed to a strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerParams {
    /// Target fraction of the layer's vertices to merge.
    pub reduction_factor: f64,
    /// Strategy.
    pub matching: MatchingMethod,
    /// Pairwise score used by the two-hop and modularity strategies.
    pub similarity: Similarity,
    /// Seed ordering for seeded strategies.
    pub seed_priority: SeedPriority,
    /// Biclique search options.
    pub biclique: BicliqueOpts,
    /// Sort direction of the globally sorted strategies.
    pub score_order: ScoreOrder,
}

impl LayerParams {
    /// `floor(reduction_factor · n)`.
    pub fn merge_budget(&self, n: usize) -> usize {
        (self.reduction_factor * n as f64).floor() as usize
    }
}

/// Work item for one layer in one round.
#[derive(Debug, Clone)]
pub struct LayerTask {
    /// Layer being matched.
    pub layer: LayerId,
    /// Vertex id range of the layer.
    pub range: Range<VertexId>,
    /// Strategy parameters.
    pub params: LayerParams,
    /// Seed of the worker's random stream.
    pub rng_seed: u64,
}

/// Result of matching one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerOutcome {
    /// Layer that was matched.
    pub layer: LayerId,
    /// Vertices removed by the layer's matching.
    pub merges: usize,
    /// Representation written into the slice.
    pub form: MatchingForm,
}

/// Runs the configured strategy for one layer, writing into `slice`.
pub fn match_layer(
    graph: &Graph,
    task: &LayerTask,
    slice: &mut [VertexId],
) -> Result<LayerOutcome, MobError> {
    if slice.len() != task.range.len() {
        return Err(MobError::Matching(
            ErrorInfo::new("length-mismatch", "matching slice does not cover the layer")
                .with_context("layer", task.layer)
                .with_context("slice", slice.len())
                .with_context("range", task.range.len()),
        ));
    }
    let params = &task.params;
    let budget = params.merge_budget(task.range.len());
    let mut rng = RngHandle::from_seed(task.rng_seed);
    log::debug!(
        "layer {}: {} over {} vertices, budget {}",
        task.layer,
        params.matching,
        task.range.len(),
        budget
    );

    let score = params.similarity.resolve();
    let merges = match params.matching {
        MatchingMethod::GreedyTwohops => greedy_pairs(
            graph,
            task.range.clone(),
            slice,
            budget,
            params.score_order,
            false,
            |i, j| score(graph, i, j),
        ),
        MatchingMethod::GreedyModularity => {
            let total = graph.total_edge_weight();
            greedy_pairs(
                graph,
                task.range.clone(),
                slice,
                budget,
                params.score_order,
                true,
                |i, j| modularity_gain(graph, score, i, j, total),
            )
        }
        MatchingMethod::GreedySeedTwohops => {
            let seeds = seed_order(graph, task.range.clone(), params.seed_priority, &mut rng);
            seeded_pairs(graph, task.range.clone(), slice, budget, &seeds, |i, j| {
                score(graph, i, j)
            })
        }
        MatchingMethod::GreedySeedModularity => {
            let total = graph.total_edge_weight();
            let seeds = seed_order(graph, task.range.clone(), params.seed_priority, &mut rng);
            seeded_pairs(graph, task.range.clone(), slice, budget, &seeds, |i, j| {
                modularity_gain(graph, score, i, j, total)
            })
        }
        MatchingMethod::GreedyBiclique => {
            greedy_biclique(graph, task.range.clone(), slice, budget, &params.biclique)
        }
        MatchingMethod::GreedySeedBiclique => {
            let seeds = seed_order(graph, task.range.clone(), params.seed_priority, &mut rng);
            greedy_seed_biclique(
                graph,
                task.range.clone(),
                slice,
                budget,
                &seeds,
                &params.biclique,
            )
        }
    };

    log::debug!("layer {}: {} merges", task.layer, merges);
    Ok(LayerOutcome {
        layer: task.layer,
        merges,
        form: params.matching.form(),
    })
}
