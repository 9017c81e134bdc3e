//! Provenance and schema descriptors shared across serialized artifacts.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// `major.minor.patch` version of a serialized payload layout.
///
/// Readers accept any payload with the same major version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Bumped when old readers can no longer load the payload.
    pub major: u32,
    /// Bumped for additive fields.
    pub minor: u32,
    /// Bumped for fixes that leave the layout alone.
    pub patch: u32,
}

impl SchemaVersion {
    /// Builds a version from its three components.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Whether a reader at `self` can load a payload written at `written`.
    pub fn reads(&self, written: &SchemaVersion) -> bool {
        self.major == written.major
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Provenance attached to a coarsening hierarchy report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HierarchyProvenance {
    /// Hash of the configuration that drove the run.
    pub config_hash: String,
    /// Canonical hash of the input graph.
    pub input_graph_hash: String,
    /// Master seed used for random seed orderings.
    pub seed: u64,
    /// Schema version of the serialized graphs.
    pub schema_version: SchemaVersion,
    /// Version map for the crates involved in the run.
    pub tool_versions: BTreeMap<String, String>,
}
