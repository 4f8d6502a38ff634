// src/config.rs
use crate::errors::{DashboardError, Result};
use std::path::PathBuf;

/// Default CKAN datastore search endpoint for the SSE open-data portal.
pub const DEFAULT_API_BASE: &str =
    "https://ckan-prod.sse.datopian.com/api/3/action/datastore_search";

/// Resource id of the embedded capacity register dataset.
pub const DEFAULT_RESOURCE_ID: &str = "d258bd7b-22db-4d32-9450-b3783591b66d";

/// Where the upstream datastore lives and how much to pull from it.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub api_base: String,
    pub resource_id: String,
    pub fetch_limit: u32,
}

/// High-level application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub upstream: UpstreamConfig,
    pub bind_addr: String,
    pub port: u16,
    pub cache_path: PathBuf,
}

/// Configuration for the terminal watch client.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub dashboard_url: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Every variable has a default, so an empty environment is valid.
    pub fn from_env() -> Result<Self> {
        let api_base = std::env::var("CKAN_API_BASE")
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let resource_id = std::env::var("CKAN_RESOURCE_ID")
            .unwrap_or_else(|_| DEFAULT_RESOURCE_ID.to_string());
        let fetch_limit = parse_var("FETCH_LIMIT", std::env::var("FETCH_LIMIT").ok(), 5000)?;
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_var("PORT", std::env::var("PORT").ok(), 5000)?;
        let cache_path = PathBuf::from(
            std::env::var("CACHE_PATH").unwrap_or_else(|_| "data_cache.json".to_string()),
        );

        Ok(AppConfig {
            upstream: UpstreamConfig {
                api_base,
                resource_id,
                fetch_limit,
            },
            bind_addr,
            port,
            cache_path,
        })
    }
}

impl WatchConfig {
    /// Load the watch client configuration from environment variables.
    pub fn from_env() -> Self {
        let dashboard_url = std::env::var("DASHBOARD_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
        WatchConfig { dashboard_url }
    }
}

/// Parses an optional raw variable value, falling back to `default` when the
/// variable is unset. A set-but-unparsable value is a configuration error.
fn parse_var<T: std::str::FromStr>(name: &str, raw: Option<String>, default: T) -> Result<T> {
    match raw {
        Some(value) => value.trim().parse::<T>().map_err(|_| {
            DashboardError::Config(format!("{} must be a number, got '{}'", name, value))
        }),
        None => Ok(default),
    }
}
