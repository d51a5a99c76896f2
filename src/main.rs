use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use lectern::{
    reminders::{evening_message, morning_message},
    storage::FileStorage,
    AppStateStore, Catalog,
};

/// Dev harness: load the catalog and the persisted state, print a library
/// summary and both reminder previews.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("lectern preview starting up...");

    let assets_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/essays".to_string());
    let data_dir = std::env::var("LECTERN_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(".lectern"));
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

    let catalog = Catalog::new(&assets_dir);
    let index = catalog.index().context("failed to load essay index")?;

    let store = AppStateStore::open(Arc::new(FileStorage::new(&data_dir))).await;
    let snapshot = store.snapshot().await;

    println!("{} essays in catalog", index.len());
    println!(
        "{} favorites, {} in progress, {} read",
        snapshot.favorites.len(),
        snapshot
            .reading_progress
            .values()
            .filter(|p| p.is_in_progress())
            .count(),
        store.read_count().await,
    );

    let morning = morning_message(index, &snapshot.reading_progress);
    println!("\n{}\n{}", morning.title, morning.body);

    let evening = evening_message(index, &snapshot.reading_progress);
    println!("\n{}\n{}", evening.title, evening.body);

    Ok(())
}
