// src/ckan.rs

use futures::future;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::errors::{DashboardError, Result};

/// One row from the CKAN datastore: arbitrary columns keyed by field id.
pub type Record = serde_json::Map<String, Value>;

/// Free-text terms used to pull additional Scottish rows from the datastore.
pub const SEARCH_TERMS: [&str; 4] = ["Scotland", "Glasgow", "Edinburgh", "Aberdeen"];

/// Upper bound the datastore accepts for one general query.
const GENERAL_QUERY_CAP: u32 = 1000;

/// Row limit for each per-term search.
const TERM_QUERY_LIMIT: u32 = 500;

#[derive(Deserialize)]
struct DatastoreResponse {
    success: bool,
    result: Option<DatastoreResult>,
}

#[derive(Deserialize)]
struct DatastoreResult {
    records: Vec<Record>,
}

/// A client for the SSE CKAN `datastore_search` API.
pub struct DatastoreClient {
    client: Client,
    config: UpstreamConfig,
}

impl DatastoreClient {
    /// Creates a new `DatastoreClient`.
    pub fn new(client: Client, config: UpstreamConfig) -> Self {
        Self { client, config }
    }

    /// Runs one `datastore_search` call, optionally with a free-text query.
    pub async fn datastore_search(&self, query: Option<&str>, limit: u32) -> Result<Vec<Record>> {
        let mut params: Vec<(&str, String)> = vec![
            ("resource_id", self.config.resource_id.clone()),
            ("limit", limit.to_string()),
        ];
        if let Some(q) = query {
            params.push(("q", q.to_string()));
        }

        let resp = self
            .client
            .get(&self.config.api_base)
            .query(&params)
            .send()
            .await?;

        let status = resp.status();

        if !status.is_success() {
            let error_body = resp
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_string());
            return Err(DashboardError::ApiError {
                status: status.as_u16(),
                body: error_body,
            });
        }

        let datastore_resp: DatastoreResponse = resp.json().await?;

        if !datastore_resp.success {
            return Err(DashboardError::ApiResponse(
                "datastore_search reported success = false".to_string(),
            ));
        }

        let result = datastore_resp.result.ok_or_else(|| {
            DashboardError::UnexpectedResponse(
                "datastore_search response carried no result".to_string(),
            )
        })?;

        Ok(result.records)
    }

    /// Pulls a general sample plus one search per Scottish term and merges the
    /// results, dropping duplicate rows. Individual query failures are logged
    /// and skipped; with everything down this returns an empty set and the
    /// store decides the fallback.
    pub async fn fetch_capacity_records(&self, limit: u32) -> Vec<Record> {
        println!("📡 Fetching Scotland data from the SSE datastore...");

        let mut all_records: Vec<Record> = Vec::new();

        match self.datastore_search(None, limit.min(GENERAL_QUERY_CAP)).await {
            Ok(records) => {
                println!("📥 Retrieved {} general records", records.len());
                all_records.extend(records);
            }
            Err(e) => eprintln!("❌ Error fetching general data: {}", e),
        }

        let searches: Vec<_> = SEARCH_TERMS
            .iter()
            .map(|&term| self.datastore_search(Some(term), TERM_QUERY_LIMIT))
            .collect();
        let results = future::join_all(searches).await;

        for (term, result) in SEARCH_TERMS.iter().zip(results) {
            match result {
                Ok(records) => {
                    println!("📥 Found {} records for '{}'", records.len(), term);
                    for record in records {
                        if !all_records.contains(&record) {
                            all_records.push(record);
                        }
                    }
                }
                Err(e) => eprintln!("❌ Error searching for {}: {}", term, e),
            }
        }

        println!("📊 Total records retrieved: {}", all_records.len());
        all_records
    }
}
