use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::StorageError;

use super::Storage;

/// File-backed storage: one JSON document per key under a data directory.
///
/// Writes go to a temp file first and are renamed into place, so an entry
/// is always either its previous value or the new one, never a torn write.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(file_name_for(key))
    }
}

/// Map a storage key to a safe file name. Namespace separators become
/// underscores; anything else outside [A-Za-z0-9_-] is dropped.
fn file_name_for(key: &str) -> String {
    let mut name: String = key
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' => Some(c),
            ':' | '.' | '/' => Some('_'),
            _ => None,
        })
        .collect();
    if name.is_empty() {
        name.push('_');
    }
    name.push_str(".json");
    name
}

#[async_trait]
impl Storage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            key: key.to_string(),
            source,
        };

        tokio::fs::create_dir_all(&self.dir).await.map_err(write_err)?;

        let path = self.path_for(key);
        let temp_path = self.dir.join(format!("{}.tmp", file_name_for(key)));
        tokio::fs::write(&temp_path, value).await.map_err(write_err)?;
        tokio::fs::rename(&temp_path, &path).await.map_err(write_err)?;

        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Write {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KEY_FAVORITES, KEY_READING_PROGRESS};

    #[test]
    fn key_sanitization_keeps_keys_distinct() {
        let progress = file_name_for(KEY_READING_PROGRESS);
        let favorites = file_name_for(KEY_FAVORITES);
        assert_eq!(progress, "lectern_reading_progress.json");
        assert_ne!(progress, favorites);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path());

        storage
            .set_item(KEY_FAVORITES, r#"["essay-a"]"#)
            .await
            .expect("set");
        let value = storage.get_item(KEY_FAVORITES).await.expect("get");
        assert_eq!(value.as_deref(), Some(r#"["essay-a"]"#));
    }

    #[tokio::test]
    async fn missing_entry_reads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get_item(KEY_FAVORITES).await.expect("get"), None);
    }

    #[tokio::test]
    async fn overwrite_replaces_whole_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path());

        storage.set_item(KEY_FAVORITES, "[]").await.expect("set");
        storage
            .set_item(KEY_FAVORITES, r#"["essay-b"]"#)
            .await
            .expect("overwrite");
        let value = storage.get_item(KEY_FAVORITES).await.expect("get");
        assert_eq!(value.as_deref(), Some(r#"["essay-b"]"#));
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path());

        storage.set_item(KEY_FAVORITES, "[]").await.expect("set");
        storage.remove_item(KEY_FAVORITES).await.expect("remove");
        storage
            .remove_item(KEY_FAVORITES)
            .await
            .expect("second remove");
        assert_eq!(storage.get_item(KEY_FAVORITES).await.expect("get"), None);
    }

    #[tokio::test]
    async fn values_survive_reopening_the_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let storage = FileStorage::new(dir.path());
            storage
                .set_item(KEY_READING_PROGRESS, "{}")
                .await
                .expect("set");
        }

        let reopened = FileStorage::new(dir.path());
        let value = reopened.get_item(KEY_READING_PROGRESS).await.expect("get");
        assert_eq!(value.as_deref(), Some("{}"));
    }
}
