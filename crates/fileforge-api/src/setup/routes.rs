//! Route configuration and setup

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use fileforge_core::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// API path prefix for the operation endpoints.
pub const API_PREFIX: &str = "/api/v0";

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router<()> {
    let cors = setup_cors(config);

    // The request body carries the whole multipart batch; bound it by the
    // worst legal case plus form overhead
    let body_limit = config
        .combine_max_total_bytes
        .max(config.max_file_size_bytes * config.max_files_per_batch)
        + 1024 * 1024;

    let api = Router::new()
        .route("/convert", post(handlers::convert::convert))
        .route("/combine", post(handlers::combine::combine))
        .route("/pdf-to-word", post(handlers::pdf_to_word::pdf_to_word))
        .route("/pdf-to-images", post(handlers::pdf_to_images::pdf_to_images))
        .route("/stats", get(handlers::stats::stats));

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest(API_PREFIX, api)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> CorsLayer {
    if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    }
}
