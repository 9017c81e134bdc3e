//! Multilevel coarsening of bipartite graphs.
//!
//! A round picks the layers that are still active, lets each layer's
//! configured matching strategy group that layer's vertices, and contracts
//! the combined matching into a smaller graph. [`coarsen`] repeats rounds
//! until every layer reaches its level limit or vertex floor, or a round
//! merges nothing, and returns the resulting [`Hierarchy`].
//!
//! ```no_run
//! use mob_coarsen::{coarsen, CoarsenConfig};
//! use mob_graph::parse_edge_list;
//!
//! let graph = parse_edge_list("0 2\n1 2\n0 3\n", &[2, 2])?;
//! let hierarchy = coarsen(&graph, &CoarsenConfig::default())?;
//! println!("{} graphs", hierarchy.graphs.len());
//! # Ok::<(), mob_core::MobError>(())
//! ```

/// Maximal biclique search.
pub mod biclique;
/// Contraction of a matching into a coarse graph.
pub mod contract;
/// Canonical hashing helpers for reports and configurations.
pub mod hash;
/// Round and hierarchy controller.
pub mod hierarchy;
/// Matching strategies.
pub mod matching;
/// Coarsening configuration.
pub mod params;
/// Serde helpers for JSON reports.
#[path = "serde.rs"]
pub mod serde_io;
/// Pairwise similarity measures.
pub mod similarity;
/// Membership projection and cluster files.
pub mod uncoarsen;

pub use biclique::{find_bicliques, Biclique, BicliqueOpts, BicliquePriority};
pub use contract::{contract, ContractResult, ContractionSummary};
pub use hierarchy::{
    active_layers, coarsen, coarsen_round, match_round, CoarsenStep, Hierarchy, HierarchyReport,
    LevelReport, StopReason,
};
pub use matching::{Matching, MatchingForm, MatchingMethod, ScoreOrder, SeedPriority};
pub use params::{CoarsenConfig, LayerConfig, ResolvedConfig};
pub use similarity::{modularity_gain, Similarity};
