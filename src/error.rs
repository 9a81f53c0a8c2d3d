//! Error types.
//!
//! - [`ConfigError`]: configuration defects, detected before any simulation starts
//! - [`SimError`]: everything a simulation entry point can fail with
//!
//! The engine performs no I/O while simulating, so nothing here is retryable.

use std::path::PathBuf;

use thiserror::Error;

/// A configuration or argument defect. Always names the offending field.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("lineup is empty")]
    EmptyLineup,

    #[error("lineup position '{position}' has no batter entry")]
    MissingBatter { position: String },

    #[error("{field} must be positive")]
    NonPositive { field: &'static str },

    #[error("{field} = {value} is not a probability in [0, 1]")]
    ProbabilityOutOfRange { field: String, value: f64 },

    #[error("{field} = {value} must be finite and non-negative")]
    NegativeValue { field: String, value: f64 },

    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Top-level error for simulation entry points.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("half-inning exceeded {limit} plate appearances without ending")]
    PlateAppearanceLimit { limit: u64 },

    #[error("failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}
