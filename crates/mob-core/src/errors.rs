//! Structured error types shared across the coarsening crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`MobError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (vertex ids, layer indices, sizes).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.message, self.code)?;
        let mut pairs = self.context.iter();
        if let Some((key, value)) = pairs.next() {
            write!(f, " ({key}={value}")?;
            for (key, value) in pairs {
                write!(f, ", {key}={value}")?;
            }
            f.write_str(")")?;
        }
        match &self.hint {
            Some(hint) => write!(f, "; hint: {hint}"),
            None => Ok(()),
        }
    }
}

/// Canonical error type for the coarsening engine.
///
/// Configuration errors are reported before any round runs. Graph, matching
/// and contraction errors abort the current round; no partially contracted
/// graph is ever returned alongside them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum MobError {
    /// Invalid or inconsistent per-layer parameters.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Graph construction and query errors.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Malformed matchings or worker failures.
    #[error("matching error: {0}")]
    Matching(ErrorInfo),
    /// Violations detected while contracting a matching.
    #[error("contraction error: {0}")]
    Contraction(ErrorInfo),
    /// Serialization, parsing and I/O errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl MobError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            MobError::Config(info)
            | MobError::Graph(info)
            | MobError::Matching(info)
            | MobError::Contraction(info)
            | MobError::Serde(info) => info,
        }
    }

    /// Name of the error family, as written in the serialized `family` tag.
    pub fn family(&self) -> &'static str {
        match self {
            MobError::Config(_) => "Config",
            MobError::Graph(_) => "Graph",
            MobError::Matching(_) => "Matching",
            MobError::Contraction(_) => "Contraction",
            MobError::Serde(_) => "Serde",
        }
    }

    /// Returns the stable error code of the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }
}
