// src/api/handlers/refresh.rs
use actix_web::{web, HttpResponse, Result};
use serde_json::json;

use crate::api::AppState;

/// Forces a data refresh. The `status` field of the reply is the contract
/// the page script and the watch client branch on.
pub async fn refresh_data(state: web::Data<AppState>) -> Result<HttpResponse> {
    match state.store.refresh().await {
        Ok(snapshot) => Ok(HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Data refreshed successfully",
            "data": snapshot,
        }))),
        Err(e) => {
            log::error!("Refresh failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": e.to_string(),
            })))
        }
    }
}
