// src/api/handlers.rs
mod data;
mod health;
mod pages;
mod refresh;

pub use data::get_data;
pub use health::health_check;
pub use pages::{details, index, refresh_page};
pub use refresh::refresh_data;
