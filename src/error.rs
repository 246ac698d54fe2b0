//! Error types for dereferencing, loading, and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while walking a schema and substituting `$ref` targets.
#[derive(Debug, Error)]
pub enum DerefError {
    /// The `$ref` is not of the form `#/<section>/<type>/<name>`.
    #[error("unsupported $ref pointer {pointer:?}: expected #/<section>/<type>/<name>")]
    UnsupportedPointer { pointer: String },

    /// A `$ref` value that is not a string at all.
    #[error("invalid $ref at {path}: expected string, got {actual}")]
    InvalidRefType { path: String, actual: String },

    #[error("cyclic $ref {pointer} (via {})", chain.join(" -> "))]
    CyclicReference { pointer: String, chain: Vec<String> },

    /// Only raised when unresolved references are denied.
    #[error("unresolved $ref {pointer}: no entry at {missing}")]
    UnresolvedReference { pointer: String, missing: String },
}

/// Errors while loading a document from text, disk, or the network.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that prevent validation from running.
///
/// An instance that fails its schema is not an error here; see
/// [`crate::validate`], which returns the violations as a list.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error(transparent)]
    Deref(#[from] DerefError),

    #[error("invalid schema: {message}")]
    InvalidSchema { message: String },
}

/// Single validation error with path context.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SchemaError {
    /// JSON Pointer (RFC 6901) to the invalid field. Empty at the root.
    pub path: String,
    /// Human-readable error message.
    pub message: String,
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl DerefError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            LoadError::NetworkError { .. } => 3,
            LoadError::InvalidJson { .. } => 2,
        }
    }
}

impl ValidateError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ValidateError::Deref(e) => e.exit_code(),
            ValidateError::InvalidSchema { .. } => 2,
        }
    }
}
