use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use log::{error, warn};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::{watch, RwLock};

use crate::{
    models::{ReadingProgress, Settings, SettingsPatch},
    storage::{Storage, KEY_FAVORITES, KEY_READING_PROGRESS, KEY_SETTINGS},
};

/// Aggregate owned by the store. Callers only ever see clones of this;
/// mutation goes through the store's operations.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub reading_progress: HashMap<String, ReadingProgress>,
    pub favorites: HashSet<String>,
    pub settings: Settings,
}

/// Single source of truth for reading progress, favorites and settings.
///
/// Persistence is best-effort: every mutation updates memory first, then
/// attempts the storage write; a storage failure is logged and swallowed,
/// and the in-memory value stays authoritative for the rest of the
/// process. No mutation ever errors back to the caller.
pub struct AppStateStore {
    storage: Arc<dyn Storage>,
    state: RwLock<AppState>,
    loading: AtomicBool,
    changes: watch::Sender<AppState>,
}

impl AppStateStore {
    /// Construct in the Loading phase. Call `load_from_storage` (or use
    /// `open`) before relying on the persisted state.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let (changes, _) = watch::channel(AppState::default());
        Self {
            storage,
            state: RwLock::new(AppState::default()),
            loading: AtomicBool::new(true),
            changes,
        }
    }

    /// Construct and load in one step.
    pub async fn open(storage: Arc<dyn Storage>) -> Self {
        let store = Self::new(storage);
        store.load_from_storage().await;
        store
    }

    /// True until the initial storage reads have settled.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Read the three persisted collections concurrently.
    ///
    /// The reads are independent: a missing or corrupt entry logs a
    /// warning and leaves that collection at its default, without
    /// blocking the other two. The store is Ready once all three settle.
    pub async fn load_from_storage(&self) {
        let (progress, favorites, settings) = tokio::join!(
            self.read_entry::<HashMap<String, ReadingProgress>>(KEY_READING_PROGRESS),
            self.read_entry::<Vec<String>>(KEY_FAVORITES),
            self.read_entry::<Settings>(KEY_SETTINGS),
        );

        let mut state = self.state.write().await;
        if let Some(progress) = progress {
            state.reading_progress = progress;
        }
        if let Some(favorites) = favorites {
            state.favorites = favorites.into_iter().collect();
        }
        if let Some(settings) = settings {
            state.settings = settings;
        }
        self.loading.store(false, Ordering::SeqCst);
        self.publish(&state);
    }

    /// Record a new scroll state for `essay_id`, replacing any prior
    /// entry wholesale. `is_read` is recomputed from the fraction and
    /// `last_read_at` stamped with the current time.
    pub async fn update_progress(
        &self,
        essay_id: &str,
        scroll_position: f64,
        progress_fraction: f64,
    ) {
        let record = ReadingProgress::new(essay_id, scroll_position, progress_fraction);

        let mut state = self.state.write().await;
        state
            .reading_progress
            .insert(essay_id.to_string(), record);
        self.persist(KEY_READING_PROGRESS, &state.reading_progress)
            .await;
        self.publish(&state);
    }

    /// Flip membership of `essay_id` in the favorites set. Ids that are
    /// not in the current catalog are accepted; the set is not validated
    /// against the index.
    pub async fn toggle_favorite(&self, essay_id: &str) {
        let mut state = self.state.write().await;
        if !state.favorites.remove(essay_id) {
            state.favorites.insert(essay_id.to_string());
        }

        // Persisted sorted so equal sets always produce identical blobs.
        let mut blob: Vec<&String> = state.favorites.iter().collect();
        blob.sort();
        self.persist(KEY_FAVORITES, &blob).await;
        self.publish(&state);
    }

    /// Shallow-merge `patch` into the current settings and persist the
    /// merged record.
    pub async fn update_settings(&self, patch: SettingsPatch) {
        let mut state = self.state.write().await;
        state.settings.apply(&patch);
        self.persist(KEY_SETTINGS, &state.settings).await;
        self.publish(&state);
    }

    /// Reset all reading progress and drop the persisted entry.
    pub async fn clear_progress(&self) {
        let mut state = self.state.write().await;
        state.reading_progress.clear();
        self.remove_entry(KEY_READING_PROGRESS).await;
        self.publish(&state);
    }

    /// Reset favorites and drop the persisted entry.
    pub async fn clear_favorites(&self) {
        let mut state = self.state.write().await;
        state.favorites.clear();
        self.remove_entry(KEY_FAVORITES).await;
        self.publish(&state);
    }

    pub async fn snapshot(&self) -> AppState {
        self.state.read().await.clone()
    }

    pub async fn progress_for(&self, essay_id: &str) -> Option<ReadingProgress> {
        self.state.read().await.reading_progress.get(essay_id).cloned()
    }

    pub async fn is_favorite(&self, essay_id: &str) -> bool {
        self.state.read().await.favorites.contains(essay_id)
    }

    pub async fn settings(&self) -> Settings {
        self.state.read().await.settings.clone()
    }

    /// Number of essays marked read, as surfaced in the library header.
    pub async fn read_count(&self) -> usize {
        self.state
            .read()
            .await
            .reading_progress
            .values()
            .filter(|p| p.is_read)
            .count()
    }

    /// Observe state changes. Every mutation and the initial load publish
    /// a fresh snapshot to all subscribers.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.changes.subscribe()
    }

    fn publish(&self, state: &AppState) {
        self.changes.send_replace(state.clone());
    }

    async fn read_entry<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.storage.get_item(key).await {
            Ok(raw) => raw?,
            Err(err) => {
                warn!("Falling back to defaults for {key}: {err}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("Discarding corrupt entry {key}: {err}");
                None
            }
        }
    }

    async fn persist<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(err) => {
                error!("Failed to encode {key}: {err}");
                return;
            }
        };

        if let Err(err) = self.storage.set_item(key, &payload).await {
            error!("Failed to persist {key}: {err}");
        }
    }

    async fn remove_entry(&self, key: &str) {
        if let Err(err) = self.storage.remove_item(key).await {
            error!("Failed to remove {key}: {err}");
        }
    }
}
