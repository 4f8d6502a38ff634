// src/api/routes.rs
use actix_web::web;
use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health_check))
            .route("/data", web::get().to(handlers::get_data))
            .route("/refresh", web::post().to(handlers::refresh_data)),
    )
    .route("/", web::get().to(handlers::index))
    .route("/refresh", web::get().to(handlers::refresh_page))
    .route("/details", web::get().to(handlers::details));
}
