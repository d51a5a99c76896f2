//! Device-local core for an offline essay reading app.
//!
//! Owns the essay catalog, the persistent app state (reading progress,
//! favorites, settings) and the reminder message generator. The mobile
//! shells render this state and call back into the store's operations;
//! they never mutate the collections directly.

pub mod catalog;
pub mod error;
pub mod models;
pub mod reminders;
pub mod storage;
pub mod store;

pub use catalog::Catalog;
pub use error::{CatalogError, ContentError, StorageError};
pub use models::{Essay, EssayMetadata, ReadingProgress, Settings, SettingsPatch};
pub use reminders::{evening_message, morning_message, ReminderMessage, ReminderTime};
pub use store::{AppState, AppStateStore};
