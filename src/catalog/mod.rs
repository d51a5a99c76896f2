use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use log::info;

use crate::{
    error::{CatalogError, ContentError},
    models::{Essay, EssayMetadata},
};

/// Name of the build-time-generated index inside the assets directory.
pub const INDEX_FILENAME: &str = "index.json";

/// Read-only view over the bundled essay corpus.
///
/// The index is eager and cached after the first successful load; essay
/// bodies are resolved lazily, one file per essay.
pub struct Catalog {
    assets_dir: PathBuf,
    index: OnceLock<Vec<EssayMetadata>>,
}

impl Catalog {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            index: OnceLock::new(),
        }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// Load the essay index, caching the parsed list on first success.
    ///
    /// Failures are not cached, so callers may retry after e.g. an asset
    /// re-install.
    pub fn index(&self) -> Result<&[EssayMetadata], CatalogError> {
        if let Some(cached) = self.index.get() {
            return Ok(cached);
        }

        let loaded = self.read_index()?;
        info!("Loaded essay index with {} entries", loaded.len());
        Ok(self.index.get_or_init(|| loaded))
    }

    /// Look up one essay's metadata by id.
    pub fn entry(&self, id: &str) -> Result<Option<&EssayMetadata>, CatalogError> {
        Ok(self.index()?.iter().find(|essay| essay.id == id))
    }

    /// Resolve the markdown body for the given essay id.
    ///
    /// An id missing from the index fails with `ContentError::NotFound`; an
    /// id whose file cannot be read or resolves to an empty body fails with
    /// a retryable variant.
    pub async fn content(&self, id: &str) -> Result<String, ContentError> {
        let entry = self.entry(id)?.ok_or_else(|| ContentError::NotFound {
            id: id.to_string(),
        })?;

        let path = self.assets_dir.join(&entry.filename);
        let body = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ContentError::Load {
                id: id.to_string(),
                source,
            })?;

        if body.trim().is_empty() {
            return Err(ContentError::Empty { id: id.to_string() });
        }

        Ok(body)
    }

    /// Metadata and body together, the shape the reader screen consumes.
    pub async fn essay(&self, id: &str) -> Result<Essay, ContentError> {
        let content = self.content(id).await?;
        let metadata = self
            .entry(id)?
            .cloned()
            .ok_or_else(|| ContentError::NotFound {
                id: id.to_string(),
            })?;

        Ok(Essay { metadata, content })
    }

    fn read_index(&self) -> Result<Vec<EssayMetadata>, CatalogError> {
        let path = self.assets_dir.join(INDEX_FILENAME);
        let raw = fs::read_to_string(&path).map_err(|source| CatalogError::Read {
            path: path.clone(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| CatalogError::Parse { path, source })
    }
}
