use mob_core::errors::{ErrorInfo, MobError};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::params::CoarsenConfig;
use crate::{HierarchyReport, LevelReport};

fn hash_json<T: Serialize>(value: &T) -> Result<String, MobError> {
    let json = serde_json::to_vec(value)
        .map_err(|err| MobError::Serde(ErrorInfo::new("json-serialize", err.to_string())))?;
    let mut hasher = Sha256::new();
    hasher.update(json);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Computes the canonical hash for a per-level report.
pub fn hash_level(report: &LevelReport) -> Result<String, MobError> {
    hash_json(report)
}

/// Computes the canonical hash for a hierarchy report.
pub fn hash_hierarchy(report: &HierarchyReport) -> Result<String, MobError> {
    hash_json(report)
}

/// Computes the canonical hash for a configuration.
pub fn hash_config(config: &CoarsenConfig) -> Result<String, MobError> {
    hash_json(config)
}
