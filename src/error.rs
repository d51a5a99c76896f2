use std::path::PathBuf;

use thiserror::Error;

/// The bundled essay index could not be loaded.
///
/// Fatal to any screen that depends on the catalog, but retryable: the
/// failure is not cached, so a later `index()` call reads the resource
/// again.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read essay index at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("essay index at {path} is malformed")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Per-essay content resolution failure.
///
/// `NotFound` means the id has no registered content source and a retry
/// cannot help; the other variants are transient load failures.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("essay not found: {id}")]
    NotFound { id: String },
    #[error("failed to load content for \"{id}\"")]
    Load {
        id: String,
        #[source]
        source: std::io::Error,
    },
    #[error("content for \"{id}\" resolved to an empty body")]
    Empty { id: String },
    #[error("essay index unavailable")]
    Catalog(#[from] CatalogError),
}

impl ContentError {
    /// Whether a retry is sensible for this failure.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ContentError::NotFound { .. })
    }
}

/// Device key-value storage failure.
///
/// Never fatal: reads degrade to defaults and writes are best-effort, so
/// these are logged rather than propagated out of the store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read storage entry {key}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write storage entry {key}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    pub fn key(&self) -> &str {
        match self {
            StorageError::Read { key, .. } | StorageError::Write { key, .. } => key,
        }
    }
}
