use serde::{Deserialize, Serialize};

/// Metadata for a single essay in the bundled catalog.
///
/// Records are produced by the offline build step that generates
/// `index.json`; at runtime they are read-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EssayMetadata {
    pub id: String,
    pub title: String,
    pub word_count: u32,
    pub reading_time_minutes: u32,
    pub year: i32,
    pub month: u32,
    pub url: String,
    pub filename: String,
}

/// Full essay: metadata plus its loaded markdown body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Essay {
    #[serde(flatten)]
    pub metadata: EssayMetadata,
    pub content: String,
}
