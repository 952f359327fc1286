use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use tracing::info;

use crate::discovery::{filter_services, DiscoveryOutcome};
use crate::models::{AppState, DiscoverFilterRequest, DiscoverResponse};
use crate::types::{AppError, AppResult, Service};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/discover", get(get_discover).post(post_discover))
        .with_state(state)
}

fn respond(outcome: &DiscoveryOutcome, services: Vec<Service>) -> Json<DiscoverResponse> {
    Json(DiscoverResponse {
        success: true,
        services,
        timestamp: chrono::Utc::now().to_rfc3339(),
        source: outcome.source(),
        stats: outcome.catalog().stats.clone(),
    })
}

/// GET /discover - full catalog
async fn get_discover(State(state): State<AppState>) -> AppResult<Json<DiscoverResponse>> {
    let outcome = state.discovery.discover().await?;
    info!(count = outcome.catalog().services.len(), source = outcome.source(), "Serving service catalog");

    let services = outcome.catalog().services.clone();
    Ok(respond(&outcome, services))
}

/// POST /discover - catalog filtered by category and/or network
async fn post_discover(
    State(state): State<AppState>,
    body: Result<Json<DiscoverFilterRequest>, JsonRejection>,
) -> AppResult<Json<DiscoverResponse>> {
    let Json(request) = body.map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))?;
    let outcome = state.discovery.discover().await?;
    let services = filter_services(
        &outcome.catalog().services,
        request.category.as_deref(),
        request.network.as_deref(),
    );
    info!(
        category = ?request.category,
        network = ?request.network,
        matched = services.len(),
        source = outcome.source(),
        "Serving filtered service catalog"
    );

    Ok(respond(&outcome, services))
}
