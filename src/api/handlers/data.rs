// src/api/handlers/data.rs
use actix_web::{web, HttpResponse, Result};
use serde_json::json;

use crate::api::AppState;

/// JSON endpoint serving the current capacity snapshot.
pub async fn get_data(state: web::Data<AppState>) -> Result<HttpResponse> {
    match state.store.get(false).await {
        Ok(snapshot) => Ok(HttpResponse::Ok().json(snapshot)),
        Err(e) => {
            log::error!("Failed to load capacity data: {}", e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": e.to_string(),
            })))
        }
    }
}
