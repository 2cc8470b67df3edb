//! # Engine Errors
//!
//! Error type shared by the fallible edges of the engine: snapshot files,
//! configuration files and block-name parsing. Nothing inside the simulation
//! loop itself produces an error; those paths degrade to a fallback instead.

use std::path::PathBuf;

/// Result alias used across the crate.
pub type EngineResult<T> = Result<T, EngineError>;

/// Every error the engine can return.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Reading or writing a file failed.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A document was not valid JSON or did not have the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A snapshot key was not of the form `"x,y,z"`.
    #[error("invalid block key {0:?}, expected \"x,y,z\"")]
    InvalidBlockKey(String),

    /// A block name outside the registry.
    #[error("unknown block type {0:?}")]
    UnknownBlockType(String),

    /// A configuration value is out of range.
    #[error("invalid configuration value for `{field}`: {reason}")]
    InvalidConfig {
        /// Dotted path of the offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

impl EngineError {
    /// Wraps an I/O error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Io {
            path: path.into(),
            source,
        }
    }
}
