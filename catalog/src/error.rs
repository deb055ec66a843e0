//! Error types for catalog loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a model catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension maps to no supported catalog format.
    #[error("unsupported catalog file extension: {0}")]
    UnsupportedExtension(PathBuf),
}

/// Convenience alias for results with [`CatalogError`].
pub type Result<T> = std::result::Result<T, CatalogError>;
