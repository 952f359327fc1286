use std::sync::Arc;

use crate::config::Config;
use crate::discovery::{CatalogStats, ServiceDiscovery};
use crate::types::Service;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub discovery: Arc<dyn ServiceDiscovery>,
}

// API Request/Response types

/// POST /discover body; both fields optional
#[derive(Debug, Default, serde::Deserialize)]
pub struct DiscoverFilterRequest {
    pub category: Option<String>,
    pub network: Option<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct DiscoverResponse {
    pub success: bool,
    pub services: Vec<Service>,
    pub timestamp: String,
    /// "live" or "fallback"
    pub source: &'static str,
    /// Describes the full catalog, before any filter
    pub stats: CatalogStats,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub discovery_url: String,
}
