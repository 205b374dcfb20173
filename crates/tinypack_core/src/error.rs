//! Error types for building and configuring a bundle

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while building the module graph.
///
/// Any of these aborts the whole build; there is no partial result.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("module not found: cannot resolve '{specifier}' (tried {})", attempted.display())]
    Resolution {
        specifier: String,
        attempted: PathBuf,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("require() in {} must be called with a string literal", path.display())]
    DynamicSpecifier { path: PathBuf },

    #[error("multiple chunks emit the same asset '{filename}'")]
    AssetConflict { filename: String },
}

/// Errors raised while turning a raw configuration into a [`crate::Config`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid rule pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unknown loader '{0}'")]
    UnknownLoader(String),
}

pub type Result<T, E = BuildError> = std::result::Result<T, E>;
