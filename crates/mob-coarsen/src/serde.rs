use mob_core::errors::{ErrorInfo, MobError};

use crate::{HierarchyReport, LevelReport};

fn map_err(err: serde_json::Error, code: &str) -> MobError {
    MobError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Serialises a level report to JSON.
pub fn level_to_json(report: &LevelReport) -> Result<String, MobError> {
    serde_json::to_string_pretty(report).map_err(|err| map_err(err, "json-level-serialize"))
}

/// Restores a level report from JSON.
pub fn level_from_json(json: &str) -> Result<LevelReport, MobError> {
    serde_json::from_str(json).map_err(|err| map_err(err, "json-level-deserialize"))
}

/// Serialises a hierarchy report to JSON.
pub fn hierarchy_to_json(report: &HierarchyReport) -> Result<String, MobError> {
    serde_json::to_string_pretty(report).map_err(|err| map_err(err, "json-hierarchy-serialize"))
}

/// Restores a hierarchy report from JSON.
pub fn hierarchy_from_json(json: &str) -> Result<HierarchyReport, MobError> {
    serde_json::from_str(json).map_err(|err| map_err(err, "json-hierarchy-deserialize"))
}
