//! Route definitions for the Mantri Priority Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Priority scoring
        .nest("/priority", priority_routes())
}

/// Mantri priority scoring routes
fn priority_routes() -> Router<AppState> {
    Router::new().route("/run", post(handlers::run_priority))
}
