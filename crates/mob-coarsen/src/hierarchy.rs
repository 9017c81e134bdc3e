use std::collections::BTreeMap;

use mob_core::errors::{ErrorInfo, MobError};
use mob_core::provenance::HierarchyProvenance;
use mob_core::rng::derive_layer_seed;
use mob_core::{LayerId, VertexId};
use mob_graph::{canonical_hash, Graph, GRAPH_SCHEMA_VERSION};
use rayon::prelude::*;
use rayon::ThreadPool;
use serde::{Deserialize, Serialize};

use crate::contract::contract;
use crate::hash::{hash_config, hash_hierarchy, hash_level};
use crate::matching::{match_layer, validate_pairing, LayerOutcome, LayerTask, Matching, MatchingForm};
use crate::params::{CoarsenConfig, ResolvedConfig};
use crate::uncoarsen::{project_to_finer, project_to_original};

/// Summary of one coarsening round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelReport {
    /// Zero-based round index.
    pub round: usize,
    /// Layers matched in this round.
    pub active_layers: Vec<LayerId>,
    /// Vertices removed from each layer.
    pub merges: Vec<usize>,
    /// Per-layer level counters after the round.
    pub level: Vec<usize>,
    /// Per-layer vertex counts after the round.
    pub vertices_per_layer: Vec<usize>,
    /// Vertex count of the coarse graph.
    pub vertex_count: usize,
    /// Edge count of the coarse graph.
    pub edge_count: usize,
    /// Edge weight absorbed into super-vertices.
    pub dropped_self_loop_weight: f64,
    /// Canonical hash of the coarse graph.
    pub graph_hash: String,
    /// Deterministic hash of the report itself.
    pub level_hash: String,
}

/// Why the controller stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Every layer reached its level limit or vertex floor.
    LayersTerminated,
    /// A round matched nothing in any active layer.
    NoProgress,
}

/// Summary of a full coarsening run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyReport {
    /// Inputs that identify the run.
    pub provenance: HierarchyProvenance,
    /// Hash of the input graph.
    pub initial_graph_hash: String,
    /// Hash of the coarsest graph.
    pub final_graph_hash: String,
    /// Per-layer level counters reached.
    pub final_level: Vec<usize>,
    /// Per-round summaries.
    pub levels: Vec<LevelReport>,
    /// Termination cause.
    pub stop_reason: StopReason,
    /// Deterministic content addressed hash of the report.
    pub run_hash: String,
}

/// Output of a single coarsening round.
#[derive(Debug, Clone)]
pub struct CoarsenStep {
    /// Contracted graph with level counters of the active layers advanced.
    pub graph: Graph,
    /// Fine-to-coarse vertex map.
    pub successor: Vec<VertexId>,
    /// Round summary.
    pub report: LevelReport,
}

/// Ordered graphs from finest to coarsest.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    /// Retained graphs; the input is first when every level is kept.
    pub graphs: Vec<Graph>,
    /// Run summary.
    pub report: HierarchyReport,
    keeps_all_levels: bool,
}

impl Hierarchy {
    /// The coarsest retained graph.
    pub fn coarsest(&self) -> &Graph {
        &self.graphs[self.graphs.len() - 1]
    }

    /// Projects a membership of the coarsest graph onto the input vertices.
    ///
    /// With every level kept the membership is walked down level by level
    /// through `predecessor`; otherwise it is mapped through `source`.
    pub fn project(&self, membership: &[usize]) -> Result<Vec<usize>, MobError> {
        if !self.keeps_all_levels {
            return project_to_original(self.coarsest(), membership);
        }
        let mut labels = membership.to_vec();
        for graph in self.graphs.iter().skip(1).rev() {
            labels = project_to_finer(graph, &labels)?;
        }
        Ok(labels)
    }
}

/// Layers that still take part in coarsening.
pub fn active_layers(graph: &Graph, config: &ResolvedConfig) -> Vec<LayerId> {
    config
        .layers
        .iter()
        .zip(graph.level().iter().zip(graph.vertices_per_layer()))
        .enumerate()
        .filter(|&(_, (settings, (&level, &vertices)))| !settings.is_terminated(level, vertices))
        .map(|(layer, _)| layer)
        .collect()
}

/// Matches every active layer and returns the combined grouping.
///
/// The matching array is split into disjoint per-layer slices and each
/// active layer's worker receives only its own slice. With a pool and more
/// than one active layer the workers run concurrently; all of them finish
/// before pairing slices are validated and relabelled by their smaller id.
pub fn match_round(
    graph: &Graph,
    config: &ResolvedConfig,
    round: usize,
    active: &[LayerId],
    pool: Option<&ThreadPool>,
) -> Result<(Matching, Vec<LayerOutcome>), MobError> {
    if config.layers.len() != graph.layers() {
        return Err(MobError::Config(
            ErrorInfo::new("length-mismatch", "configuration was resolved for another layer count")
                .with_context("configured", config.layers.len())
                .with_context("layers", graph.layers()),
        ));
    }
    graph.build_index();
    let mut labels: Vec<VertexId> = (0..graph.vertex_count()).collect();
    let mut ranges = Vec::with_capacity(graph.layers());
    let mut jobs: Vec<(LayerTask, &mut [VertexId])> = Vec::with_capacity(active.len());
    let mut rest: &mut [VertexId] = &mut labels;
    for layer in 0..graph.layers() {
        let range = graph.select(layer)?;
        let (slice, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
        rest = tail;
        ranges.push(range.clone());
        if active.contains(&layer) {
            let task = LayerTask {
                layer,
                range,
                params: config.layers[layer].params.clone(),
                rng_seed: derive_layer_seed(config.seed, round as u64, layer as u64),
            };
            jobs.push((task, slice));
        }
    }

    let outcomes: Vec<LayerOutcome> = match pool {
        Some(pool) if jobs.len() > 1 => pool.install(|| {
            jobs.into_par_iter()
                .map(|(task, slice)| match_layer(graph, &task, slice))
                .collect::<Result<Vec<_>, MobError>>()
        })?,
        _ => jobs
            .into_iter()
            .map(|(task, slice)| match_layer(graph, &task, slice))
            .collect::<Result<Vec<_>, MobError>>()?,
    };

    for outcome in &outcomes {
        let range = &ranges[outcome.layer];
        if outcome.form == MatchingForm::Pairing {
            validate_pairing(&labels[range.clone()], range.start)?;
        }
    }
    for outcome in &outcomes {
        for v in ranges[outcome.layer].clone() {
            labels[v] = labels[v].min(v);
        }
    }
    Ok((Matching::grouping(labels), outcomes))
}

/// Runs one round: match the active layers, contract, advance their levels.
///
/// Returns `None` when no active layer merged anything.
pub fn coarsen_round(
    graph: &Graph,
    config: &ResolvedConfig,
    round: usize,
    active: &[LayerId],
    pool: Option<&ThreadPool>,
) -> Result<Option<CoarsenStep>, MobError> {
    let (matching, outcomes) = match_round(graph, config, round, active, pool)?;
    let mut merges = vec![0usize; graph.layers()];
    for outcome in &outcomes {
        merges[outcome.layer] = outcome.merges;
    }
    if merges.iter().all(|&count| count == 0) {
        return Ok(None);
    }

    let contracted = contract(graph, &matching)?;
    let mut coarse = contracted.graph;
    for &layer in active {
        coarse.increment_level(layer)?;
    }

    let mut report = LevelReport {
        round,
        active_layers: active.to_vec(),
        merges: contracted.summary.merges_per_layer.clone(),
        level: coarse.level().to_vec(),
        vertices_per_layer: coarse.vertices_per_layer().to_vec(),
        vertex_count: coarse.vertex_count(),
        edge_count: coarse.edge_count(),
        dropped_self_loop_weight: contracted.summary.dropped_self_loop_weight,
        graph_hash: canonical_hash(&coarse),
        level_hash: String::new(),
    };
    report.level_hash = hash_level(&report)?;

    Ok(Some(CoarsenStep {
        graph: coarse,
        successor: contracted.successor,
        report,
    }))
}

/// Builds the coarsening hierarchy of `graph` under `config`.
///
/// The configuration is validated before any round runs. Rounds continue
/// until every layer is terminated or a round makes no progress.
pub fn coarsen(graph: &Graph, config: &CoarsenConfig) -> Result<Hierarchy, MobError> {
    let resolved = config.resolve(graph.layers())?;
    let pool = if resolved.parallel && graph.layers() > 1 {
        Some(
            rayon::ThreadPoolBuilder::new()
                .num_threads(graph.layers())
                .build()
                .map_err(|err| {
                    MobError::Matching(ErrorInfo::new("thread-pool", err.to_string()))
                })?,
        )
    } else {
        None
    };

    let initial_graph_hash = canonical_hash(graph);
    let provenance = HierarchyProvenance {
        config_hash: hash_config(config)?,
        input_graph_hash: initial_graph_hash.clone(),
        seed: config.seed,
        schema_version: GRAPH_SCHEMA_VERSION,
        tool_versions: BTreeMap::from([(
            env!("CARGO_PKG_NAME").to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        )]),
    };

    let mut graphs = vec![graph.clone()];
    let mut levels = Vec::new();
    let mut round = 0;
    let stop_reason = loop {
        let current = &graphs[graphs.len() - 1];
        let active = active_layers(current, &resolved);
        if active.is_empty() {
            break StopReason::LayersTerminated;
        }
        let Some(step) = coarsen_round(current, &resolved, round, &active, pool.as_ref())? else {
            log::warn!("round {round}: no active layer merged anything, stopping");
            break StopReason::NoProgress;
        };
        log::info!(
            "round {round}: layers {:?} merged {:?}, vertices per layer {:?}",
            step.report.active_layers,
            step.report.merges,
            step.report.vertices_per_layer
        );
        levels.push(step.report);
        if resolved.keep_all_levels {
            graphs.push(step.graph);
        } else {
            graphs[0] = step.graph;
        }
        round += 1;
    };

    let coarsest = &graphs[graphs.len() - 1];
    let mut report = HierarchyReport {
        provenance,
        initial_graph_hash,
        final_graph_hash: canonical_hash(coarsest),
        final_level: coarsest.level().to_vec(),
        levels,
        stop_reason,
        run_hash: String::new(),
    };
    report.run_hash = hash_hierarchy(&report)?;
    log::info!(
        "hierarchy finished after {} rounds ({:?}), {} graphs retained",
        report.levels.len(),
        report.stop_reason,
        graphs.len()
    );

    Ok(Hierarchy {
        graphs,
        report,
        keeps_all_levels: resolved.keep_all_levels,
    })
}
