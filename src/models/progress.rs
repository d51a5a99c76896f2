use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fraction of an essay that must be scrolled before it counts as read.
pub const READ_THRESHOLD: f64 = 0.9;

/// A user's reading position within one essay.
///
/// `is_read` is derived from `progress` at construction and never set
/// independently; records loaded from storage keep whatever was persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReadingProgress {
    pub essay_id: String,
    pub scroll_position: f64,
    pub progress: f64,
    pub is_read: bool,
    pub last_read_at: DateTime<Utc>,
}

impl ReadingProgress {
    /// Build a record for the given scroll state, stamped with `now`.
    ///
    /// The UI feeds raw scroll arithmetic, so `progress` is clamped into
    /// [0, 1] and `scroll_position` to non-negative.
    pub fn new(essay_id: impl Into<String>, scroll_position: f64, progress: f64) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        Self {
            essay_id: essay_id.into(),
            scroll_position: scroll_position.max(0.0),
            progress,
            is_read: progress >= READ_THRESHOLD,
            last_read_at: Utc::now(),
        }
    }

    /// In progress: opened but not yet past the read threshold.
    pub fn is_in_progress(&self) -> bool {
        self.progress > 0.0 && !self.is_read
    }
}
