//! Error types for hilite

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for hilite operations
pub type Result<T> = std::result::Result<T, HiliteError>;

/// Top-level error type
#[derive(Error, Debug)]
pub enum HiliteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot open {path}: {source}")]
    Input {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while loading or compiling a rule set or settings file.
///
/// All of these are fatal: nothing is highlighted until the rule set is valid.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("rule set is empty")]
    EmptyRuleSet,

    #[error("rule {index} has invalid regex '{pattern}': {source}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        source: regex::Error,
    },

    #[error("rule {index} ('{pattern}') has invalid color '{color}'")]
    InvalidColor {
        index: usize,
        pattern: String,
        color: String,
    },

    #[error("rule {index} ('{pattern}') has capture 0; capture groups are numbered from 1")]
    InvalidCapture { index: usize, pattern: String },
}
