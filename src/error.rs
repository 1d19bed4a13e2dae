//! Error types for the fallible edges of the crate.
//!
//! The query surface itself never fails: bad input is "no match".
//! Errors only come from loading snapshots, reading configuration,
//! resolving channel types and compiling request patterns.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A channel type name that does not correspond to any known type.
    #[error("unknown channel type name: {0:?}")]
    UnknownChannelType(String),

    /// A numeric channel type code that does not correspond to any known type.
    #[error("unknown channel type code: {0}")]
    UnknownChannelCode(i64),

    /// A pattern source that failed to compile.
    #[error("invalid pattern {source_text:?}: {source}")]
    InvalidPattern {
        source_text: String,
        #[source]
        source: regex::Error,
    },

    /// A registered cache was requested with a different entity type.
    #[error("cache '{name}' holds {actual}, not {expected}")]
    CacheTypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Missing or malformed configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Snapshot file could not be read.
    #[error("failed to read snapshot {path:?}: {source}")]
    SnapshotIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot or request JSON could not be decoded.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used by the fallible parts of the crate.
pub type Result<T> = std::result::Result<T, Error>;
