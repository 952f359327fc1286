//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/discover` - Service catalog (GET) and filtered catalog (POST)
//! - `/api/health` - Health checks

pub mod discover;
pub mod health;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::apply_cors;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let origins = state.config.server.cors_allowed_origins.clone();

    let router = Router::new()
        .merge(discover::router(state.clone()))
        .merge(health::router(state))
        .layer(TraceLayer::new_for_http());

    apply_cors(router, &origins)
}
