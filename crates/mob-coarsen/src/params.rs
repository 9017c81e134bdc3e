use std::fs;
use std::path::Path;

use mob_core::errors::{ErrorInfo, MobError};
use serde::{Deserialize, Serialize};

use crate::biclique::{BicliqueOpts, BicliquePriority};
use crate::matching::{LayerParams, MatchingForm, MatchingMethod, ScoreOrder, SeedPriority};
use crate::similarity::Similarity;

/// Coarsening configuration: per-layer parallel arrays plus run-wide switches.
///
/// Every array holds either one entry per layer or a single entry that is
/// broadcast to all layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoarsenConfig {
    /// Target fraction of each layer's vertices merged per round, in (0, 1].
    #[serde(default = "default_reduction_factor")]
    pub reduction_factor: Vec<f64>,
    /// Number of rounds each layer takes part in.
    #[serde(default = "default_max_levels")]
    pub max_levels: Vec<usize>,
    /// Matching strategy per layer.
    #[serde(default = "default_matching")]
    pub matching: Vec<MatchingMethod>,
    /// Similarity measure per layer.
    #[serde(default = "default_similarity")]
    pub similarity: Vec<Similarity>,
    /// A layer stops once it has at most this many vertices.
    #[serde(default = "default_global_min_vertices")]
    pub global_min_vertices: Vec<Option<usize>>,
    /// Seed ordering for seeded strategies.
    #[serde(default = "default_seed_priority")]
    pub seed_priority: Vec<SeedPriority>,
    /// Biclique reporting policy.
    #[serde(default = "default_biclique_priority")]
    pub biclique_priority: Vec<BicliquePriority>,
    /// Minimum `(left, right)` biclique size.
    #[serde(default = "default_min_biclique_size")]
    pub min_biclique_size: Vec<(usize, usize)>,
    /// Exact `(left, right)` size for the `size` biclique priority.
    #[serde(default = "default_biclique_size")]
    pub biclique_size: Vec<(usize, usize)>,
    /// Sort direction for the globally sorted strategies.
    #[serde(default = "default_score_order")]
    pub score_order: Vec<ScoreOrder>,
    /// Retain every level instead of only the coarsest graph.
    #[serde(default = "default_true")]
    pub keep_all_levels: bool,
    /// Match active layers on a worker pool.
    #[serde(default = "default_true")]
    pub parallel: bool,
    /// Master seed for the `random` seed priority.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_reduction_factor() -> Vec<f64> {
    vec![0.5]
}

fn default_max_levels() -> Vec<usize> {
    vec![3]
}

fn default_matching() -> Vec<MatchingMethod> {
    vec![MatchingMethod::GreedySeedTwohops]
}

fn default_similarity() -> Vec<Similarity> {
    vec![Similarity::WeightedCommonNeighbors]
}

fn default_global_min_vertices() -> Vec<Option<usize>> {
    vec![None]
}

fn default_seed_priority() -> Vec<SeedPriority> {
    vec![SeedPriority::Degree]
}

fn default_biclique_priority() -> Vec<BicliquePriority> {
    vec![BicliquePriority::Balanced]
}

fn default_min_biclique_size() -> Vec<(usize, usize)> {
    vec![(1, 1)]
}

fn default_biclique_size() -> Vec<(usize, usize)> {
    vec![(2, 2)]
}

fn default_score_order() -> Vec<ScoreOrder> {
    vec![ScoreOrder::Descending]
}

fn default_true() -> bool {
    true
}

fn default_seed() -> u64 {
    0x5EED_C0A2
}

impl Default for CoarsenConfig {
    fn default() -> Self {
        Self {
            reduction_factor: default_reduction_factor(),
            max_levels: default_max_levels(),
            matching: default_matching(),
            similarity: default_similarity(),
            global_min_vertices: default_global_min_vertices(),
            seed_priority: default_seed_priority(),
            biclique_priority: default_biclique_priority(),
            min_biclique_size: default_min_biclique_size(),
            biclique_size: default_biclique_size(),
            score_order: default_score_order(),
            keep_all_levels: true,
            parallel: true,
            seed: default_seed(),
        }
    }
}

/// Fully broadcast settings of one layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Strategy parameters handed to the layer's worker.
    pub params: LayerParams,
    /// Round limit for the layer.
    pub max_levels: usize,
    /// Optional vertex-count floor for the layer.
    pub global_min_vertices: Option<usize>,
}

impl LayerConfig {
    /// Returns true once the layer takes no further part in coarsening.
    pub fn is_terminated(&self, level: usize, vertices: usize) -> bool {
        level >= self.max_levels
            || self
                .global_min_vertices
                .map_or(false, |floor| vertices <= floor)
    }
}

/// Validated configuration with one [`LayerConfig`] per layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    /// Per-layer settings, indexed by layer.
    pub layers: Vec<LayerConfig>,
    /// Retain every level.
    pub keep_all_levels: bool,
    /// Match active layers on a worker pool.
    pub parallel: bool,
    /// Master seed.
    pub seed: u64,
}

fn config_error(code: &str, message: impl Into<String>) -> ErrorInfo {
    ErrorInfo::new(code, message)
}

fn broadcast<T: Clone>(field: &str, values: &[T], layers: usize) -> Result<Vec<T>, MobError> {
    match values.len() {
        1 => Ok(vec![values[0].clone(); layers]),
        len if len == layers => Ok(values.to_vec()),
        len => Err(MobError::Config(
            config_error("length-mismatch", format!("{field} does not match the layer count"))
                .with_context("field", field)
                .with_context("entries", len)
                .with_context("layers", layers)
                .with_hint("give one entry per layer or a single entry for all layers"),
        )),
    }
}

impl CoarsenConfig {
    /// Parses a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, MobError> {
        serde_yaml::from_str(text).map_err(|err| parse_error("yaml-deserialize", err.to_string()))
    }

    /// Parses a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, MobError> {
        serde_json::from_str(text).map_err(|err| parse_error("json-deserialize", err.to_string()))
    }

    /// Loads a configuration file; `.json` is read as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self, MobError> {
        let text = fs::read_to_string(path).map_err(|err| {
            MobError::Serde(
                ErrorInfo::new("io-read", err.to_string()).with_context("path", path.display()),
            )
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_yaml_str(&text),
        }
    }

    /// Serializes the configuration as YAML.
    pub fn to_yaml_string(&self) -> Result<String, MobError> {
        serde_yaml::to_string(self)
            .map_err(|err| MobError::Serde(ErrorInfo::new("yaml-serialize", err.to_string())))
    }

    /// Validates the arrays against `layers` and broadcasts them.
    pub fn resolve(&self, layers: usize) -> Result<ResolvedConfig, MobError> {
        let reduction_factor = broadcast("reduction_factor", &self.reduction_factor, layers)?;
        let max_levels = broadcast("max_levels", &self.max_levels, layers)?;
        let matching = broadcast("matching", &self.matching, layers)?;
        let similarity = broadcast("similarity", &self.similarity, layers)?;
        let global_min_vertices =
            broadcast("global_min_vertices", &self.global_min_vertices, layers)?;
        let seed_priority = broadcast("seed_priority", &self.seed_priority, layers)?;
        let biclique_priority = broadcast("biclique_priority", &self.biclique_priority, layers)?;
        let min_biclique_size = broadcast("min_biclique_size", &self.min_biclique_size, layers)?;
        let biclique_size = broadcast("biclique_size", &self.biclique_size, layers)?;
        let score_order = broadcast("score_order", &self.score_order, layers)?;

        let mut resolved = Vec::with_capacity(layers);
        for layer in 0..layers {
            let factor = reduction_factor[layer];
            if !(factor > 0.0 && factor <= 1.0) {
                return Err(MobError::Config(
                    config_error("invalid-reduction-factor", "reduction_factor must lie in (0, 1]")
                        .with_context("layer", layer)
                        .with_context("reduction_factor", factor),
                ));
            }
            if matching[layer].form() == MatchingForm::Pairing && factor > 0.5 {
                log::warn!(
                    "layer {layer}: {} merges pairs, so reduction_factor {factor} is capped at 0.5 in practice",
                    matching[layer]
                );
            }
            resolved.push(LayerConfig {
                params: LayerParams {
                    reduction_factor: factor,
                    matching: matching[layer],
                    similarity: similarity[layer],
                    seed_priority: seed_priority[layer],
                    biclique: BicliqueOpts {
                        priority: biclique_priority[layer],
                        min_size: min_biclique_size[layer],
                        target_size: biclique_size[layer],
                    },
                    score_order: score_order[layer],
                },
                max_levels: max_levels[layer],
                global_min_vertices: global_min_vertices[layer],
            });
        }

        Ok(ResolvedConfig {
            layers: resolved,
            keep_all_levels: self.keep_all_levels,
            parallel: self.parallel,
            seed: self.seed,
        })
    }
}

fn parse_error(code: &str, message: String) -> MobError {
    if message.contains("unknown variant") {
        MobError::Config(config_error("unknown-method", message).with_context("cause", code))
    } else {
        MobError::Config(config_error(code, message))
    }
}
