//! Error types for conversion and configuration.
//!
//! Only `ConvertError` aborts a call. `DocumentError`s are caught per
//! document and turned into diagnostics; values that cannot be classified
//! are not errors at all.

use std::path::PathBuf;

use thiserror::Error;

/// Call-level failure: nothing was converted.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("unsupported output format `{0}`: this converter only produces C source")]
    UnsupportedOutputFormat(String),
}

/// Failure confined to one input document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("not a valid JSON file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("JSON pointer `{pointer}` selects nothing")]
    PointerMissing { pointer: String },

    #[error("jq filter failed: {0}")]
    Jq(String),

    #[error("jq filter must yield exactly one value, got {count}")]
    JqArity { count: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },
}
