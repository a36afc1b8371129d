//! Application setup and initialization
//!
//! Initialization logic extracted from main.rs for better organization and
//! testability.

pub mod routes;
pub mod server;

use crate::state::AppState;
use fileforge_core::Config;
use std::sync::Arc;

/// Initialize the application: shared state and the router.
pub fn initialize_app(config: Config) -> (Arc<AppState>, axum::Router) {
    let state = AppState::new(config.clone());
    let router = routes::setup_routes(&config, state.clone());

    tracing::info!("Application initialized");
    (state, router)
}
