// src/store.rs
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::analyzer;
use crate::ckan::DatastoreClient;
use crate::errors::Result;
use crate::models::CapacitySnapshot;

/// In-memory snapshot cache with a JSON file behind it for persistence
/// across restarts.
pub struct DataStore {
    snapshot: RwLock<Option<CapacitySnapshot>>,
    cache_path: PathBuf,
    fetch_limit: u32,
    upstream: DatastoreClient,
}

impl DataStore {
    pub fn new(upstream: DatastoreClient, cache_path: PathBuf, fetch_limit: u32) -> Self {
        Self {
            snapshot: RwLock::new(None),
            cache_path,
            fetch_limit,
            upstream,
        }
    }

    /// Returns the cached snapshot, building a fresh one when the cache is
    /// empty or `force_refresh` is set.
    pub async fn get(&self, force_refresh: bool) -> Result<CapacitySnapshot> {
        if !force_refresh {
            let cached = self.snapshot.read().await;
            if let Some(snapshot) = cached.as_ref() {
                return Ok(snapshot.clone());
            }
        }

        self.refresh().await
    }

    /// Fetches upstream, aggregates, caches and persists one fresh snapshot.
    ///
    /// When the upstream fetch comes back empty the last persisted snapshot
    /// is served instead, and failing that an all-zero payload; only a
    /// persistence failure surfaces as an error (the in-memory cache already
    /// holds the fresh snapshot at that point).
    pub async fn refresh(&self) -> Result<CapacitySnapshot> {
        println!("🔄 Fetching fresh data from the API...");

        let records = self.upstream.fetch_capacity_records(self.fetch_limit).await;

        if records.is_empty() {
            let snapshot = match load_snapshot(&self.cache_path) {
                Ok(snapshot) => {
                    println!("📦 Loaded data from cache file");
                    snapshot
                }
                Err(_) => CapacitySnapshot::empty(),
            };
            *self.snapshot.write().await = Some(snapshot.clone());
            return Ok(snapshot);
        }

        let mut scotland = analyzer::filter_scotland_records(&records);
        if scotland.is_empty() {
            scotland = records;
        }
        println!("📊 Scotland records after filtering: {}", scotland.len());

        let totals = analyzer::calculate_capacity_totals(&scotland);
        let snapshot = CapacitySnapshot::build(totals, scotland.len());

        *self.snapshot.write().await = Some(snapshot.clone());
        save_snapshot(&self.cache_path, &snapshot)?;

        Ok(snapshot)
    }
}

/// Persists a snapshot as pretty-printed JSON.
pub fn save_snapshot(path: &Path, snapshot: &CapacitySnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Loads the persisted snapshot, if one exists.
pub fn load_snapshot(path: &Path) -> Result<CapacitySnapshot> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
