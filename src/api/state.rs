// src/api/state.rs
use crate::ckan::DatastoreClient;
use crate::config::AppConfig;
use crate::store::DataStore;
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DataStore>,
}

impl AppState {
    /// Builds the shared state and warms the snapshot cache once, so the
    /// first page view does not wait on the upstream API.
    pub async fn new(config: AppConfig) -> Self {
        let upstream = DatastoreClient::new(Client::new(), config.upstream.clone());
        let store = Arc::new(DataStore::new(
            upstream,
            config.cache_path,
            config.upstream.fetch_limit,
        ));

        println!("⏳ Pre-loading capacity data...");
        if let Err(e) = store.get(false).await {
            eprintln!("⚠️  Pre-load failed: {}", e);
        }

        Self { store }
    }
}
