//! Error types shared by config and results loading.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a valid config file: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{} is not a valid results file: {source}", path.display())]
    ResultsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid location '{0}' (expected path:line)")]
    InvalidLocation(String),

    #[error("invalid run time {run_time} for '{example}'")]
    InvalidRunTime { example: String, run_time: f64 },

    #[error("bad results pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("no results files matched {0:?}")]
    NoResults(Vec<String>),
}

pub type Result<T> = std::result::Result<T, Error>;
