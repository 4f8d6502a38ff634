// src/main.rs
mod analyzer;
mod api;
mod banner;
mod ckan;
mod config;
mod errors;
mod models;
mod store;
mod templates;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use api::{configure_routes, AppState};
use rust_embed::RustEmbed;
use std::borrow::Cow;

#[derive(RustEmbed)]
#[folder = "static/"]
struct StaticAssets;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Print the startup banner
    banner::print_banner();

    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  Warning: Could not load .env file: {}", e);
        eprintln!("   Falling back to the built-in upstream defaults");
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let app_config = config::AppConfig::from_env()
        .expect("Failed to load app configuration from environment");
    let bind = (app_config.bind_addr.clone(), app_config.port);

    let state = AppState::new(app_config).await;

    println!("🚀 Starting server...");
    println!("📊 Dashboard available at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
            .route("/{_:.*}", web::get().to(static_file_handler))
    })
    .bind(bind)?
    .run()
    .await
}

async fn static_file_handler(req: HttpRequest) -> impl Responder {
    // trim leading '/'
    let path = req.path().trim_start_matches('/');

    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(Cow::into_owned(content.data))
        }
        None => not_found_page(),
    }
}

fn not_found_page() -> HttpResponse {
    let body = templates::render("404.html", &serde_json::json!({}))
        .unwrap_or_else(|_| "404 Not Found".to_string());
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(body)
}
