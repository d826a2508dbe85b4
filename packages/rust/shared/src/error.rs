//! Error types for Echo Base.
//!
//! Library crates use [`EchoBaseError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all Echo Base operations.
#[derive(Debug, thiserror::Error)]
pub enum EchoBaseError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while talking to the catalog.
    #[error("network error: {0}")]
    Network(String),

    /// A payload could not be decoded into the expected JSON shape.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// A catalog search returned no results.
    #[error("no results for {query:?} at {locator}")]
    EmptyResults { locator: String, query: String },

    /// Reference resolution would nest records deeper than allowed.
    #[error("reference depth exceeded resolving '{field}' ({locator}): depth {depth} > max {max}")]
    ReferenceDepth {
        field: String,
        locator: String,
        depth: usize,
        max: usize,
    },

    /// A locator was reached again while it was still being resolved.
    #[error("reference cycle detected at {locator} (path: {})", path.join(" -> "))]
    ReferenceCycle { locator: String, path: Vec<String> },

    /// A seed document is missing an expected path or holds the wrong type there.
    #[error("document error: {message}")]
    Document { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error.
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, EchoBaseError>;

impl EchoBaseError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a decode error from any displayable message.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
        }
    }

    /// Create a document error from any displayable message.
    pub fn document(msg: impl Into<String>) -> Self {
        Self::Document {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
