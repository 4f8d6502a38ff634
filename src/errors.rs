// src/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Upstream request failed with status {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Upstream API returned an error: {0}")]
    ApiResponse(String),

    #[error("Unexpected response structure: {0}")]
    UnexpectedResponse(String),

    #[error("Template '{0}' not found")]
    TemplateNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
