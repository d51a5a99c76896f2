pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;

use crate::error::StorageError;

/// Application namespace for storage keys, so entries cannot collide with
/// unrelated consumers of the same device store.
pub const STORAGE_PREFIX: &str = "@lectern";

pub const KEY_READING_PROGRESS: &str = "@lectern:reading_progress";
pub const KEY_FAVORITES: &str = "@lectern:favorites";
pub const KEY_SETTINGS: &str = "@lectern:settings";

/// Device key-value boundary, shaped like the mobile platforms' async
/// string stores.
///
/// Implementations must treat each `set_item` as a single atomic blob
/// write: a crash mid-write may lose the latest value but never corrupts
/// the stored entry.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
