// src/lib.rs
pub mod analyzer;
pub mod api;
pub mod banner;
pub mod ckan;
pub mod config;
pub mod errors;
pub mod models;
pub mod refresh;
pub mod store;
pub mod templates;
