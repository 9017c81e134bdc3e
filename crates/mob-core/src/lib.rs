#![deny(missing_docs)]
#![doc = "Shared data types for the multilevel bipartite coarsening engine: vertex identifiers, the canonical error surface, deterministic seeding and provenance descriptors."]

pub mod errors;
pub mod provenance;
pub mod rng;

pub use errors::{ErrorInfo, MobError};
pub use provenance::{HierarchyProvenance, SchemaVersion};
pub use rng::{derive_layer_seed, RngHandle};

/// Dense vertex identifier within a single graph instance.
///
/// Identifiers are only stable inside one graph; contraction assigns fresh,
/// dense ids to the super-vertices it creates and records the mapping in the
/// vertex provenance lists.
pub type VertexId = usize;

/// Index of a layer (one side of the multipartite structure).
pub type LayerId = usize;
