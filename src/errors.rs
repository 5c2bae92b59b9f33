use std::path::PathBuf;
use thiserror::Error;

use crate::domain::NodeError;

/// Errors raised while loading or rendering settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("config error: {0}")]
    Load(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(e: config::ConfigError) -> Self {
        ConfigError::Load(e.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Crate-level error wrapping every failure kind.
#[derive(Error, Debug)]
pub enum PtreeError {
    #[error("{0}")]
    Node(#[from] NodeError),

    #[error("{0}")]
    Config(#[from] ConfigError),
}

pub type PtreeResult<T> = Result<T, PtreeError>;
