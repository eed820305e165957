//! Crate error type

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the recognition pipeline and its configuration layer
#[derive(Error, Debug)]
pub enum SignError {
    #[error("invalid landmark frame: expected {expected} points, got {got}")]
    InvalidLandmarkCount { expected: usize, got: usize },

    #[error("non-finite coordinate at landmark {index}")]
    NonFiniteCoordinate { index: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown session: {0}")]
    UnknownSession(String),
}

pub type Result<T> = std::result::Result<T, SignError>;
