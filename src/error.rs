//! Error types for body construction and scenario loading.
//!
//! Near-coincident bodies are not an error: the force evaluator skips those
//! pairs. Everything here is about rejecting bad input before a run starts.

use std::path::PathBuf;

/// Reasons a [`Body`](crate::Body) or [`BodySet`](crate::BodySet) cannot be built.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InvalidBodyError {
    #[error("body name must not be empty")]
    EmptyName,

    #[error("body '{name}' has invalid mass {mass} (must be finite and > 0)")]
    NonPositiveMass { name: String, mass: f64 },

    #[error("body '{name}' has a non-finite {field} component")]
    NonFinite { name: String, field: &'static str },

    #[error("body '{name}' {field} has {len} components (expected 3)")]
    Dimension {
        name: String,
        field: &'static str,
        len: usize,
    },

    #[error("duplicate body name '{0}'")]
    DuplicateName(String),
}

/// Errors raised while loading, validating or running a scenario.
#[derive(thiserror::Error, Debug)]
pub enum ScenarioError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Body(#[from] InvalidBodyError),

    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}
