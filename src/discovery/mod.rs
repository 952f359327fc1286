//! Service Discovery
//!
//! Fetches the facilitator's registry of x402 payment-gated resources and
//! normalizes it into a service catalog.
//!
//! ## Failure policy
//!
//! Discovery never fails its caller:
//! - **Registry unreachable** (connect error, timeout, non-2xx, bad JSON):
//!   the static fallback catalog, tagged [`DiscoveryOutcome::Fallback`]
//! - **Registry reachable, no `items` array**: an empty live catalog
//! - **One malformed item**: that item is skipped, the rest are kept

pub mod fallback;
pub mod filter;
pub mod normalize;

pub use fallback::{fallback_services, is_fallback_service};
pub use filter::filter_services;
pub use normalize::{categorize, derive_description, derive_name, normalize_item, service_id};

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::DiscoveryConfig;
use crate::payment::DiscoveryMeta;
use crate::types::{AppError, AppResult, Category, Service};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Why a registry fetch failed; every variant leads to the fallback catalog
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Registry request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Registry returned HTTP {0}")]
    Status(u16),

    #[error("Registry body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Counts for observability only
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total: usize,
    pub skipped: usize,
    pub by_network: BTreeMap<String, usize>,
    pub by_category: BTreeMap<Category, usize>,
}

impl CatalogStats {
    pub fn from_services(services: &[Service], skipped: usize) -> Self {
        let mut stats = Self {
            total: services.len(),
            skipped,
            ..Self::default()
        };
        for service in services {
            *stats.by_network.entry(service.price.network.clone()).or_default() += 1;
            *stats.by_category.entry(service.category).or_default() += 1;
        }
        stats
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub services: Vec<Service>,
    pub stats: CatalogStats,
}

impl Catalog {
    pub fn new(services: Vec<Service>, skipped: usize) -> Self {
        let stats = CatalogStats::from_services(&services, skipped);
        Self { services, stats }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }
}

/// Which path produced a catalog
#[derive(Debug, Clone, PartialEq)]
pub enum DiscoveryOutcome {
    Live(Catalog),
    Fallback(Catalog),
}

impl DiscoveryOutcome {
    pub fn catalog(&self) -> &Catalog {
        match self {
            DiscoveryOutcome::Live(catalog) | DiscoveryOutcome::Fallback(catalog) => catalog,
        }
    }

    pub fn into_services(self) -> Vec<Service> {
        match self {
            DiscoveryOutcome::Live(catalog) | DiscoveryOutcome::Fallback(catalog) => catalog.services,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, DiscoveryOutcome::Fallback(_))
    }

    pub fn source(&self) -> &'static str {
        match self {
            DiscoveryOutcome::Live(_) => "live",
            DiscoveryOutcome::Fallback(_) => "fallback",
        }
    }
}

#[async_trait]
pub trait ServiceDiscovery: Send + Sync {
    async fn discover(&self) -> AppResult<DiscoveryOutcome>;

    async fn discover_services(&self) -> AppResult<Vec<Service>> {
        Ok(self.discover().await?.into_services())
    }

    /// Where the catalog comes from, for health reporting
    fn source_url(&self) -> &str;
}

/// HTTP client for the facilitator discovery endpoint. Holds no mutable state,
/// so one instance can be shared across handlers.
pub struct DiscoveryClient {
    client: Client,
    discovery_url: String,
}

impl DiscoveryClient {
    pub fn new(discovery_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            discovery_url: discovery_url.into(),
        })
    }

    pub fn from_config(config: &DiscoveryConfig) -> AppResult<Self> {
        Self::new(config.url.clone(), Duration::from_secs(config.timeout_secs))
    }

    pub fn discovery_url(&self) -> &str {
        &self.discovery_url
    }

    async fn fetch_registry(&self) -> Result<Value, DiscoveryError> {
        let response = self
            .client
            .get(&self.discovery_url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch and normalize; always resolves to a catalog
    pub async fn discover_catalog(&self) -> DiscoveryOutcome {
        info!(url = %self.discovery_url, "Fetching service registry");

        let body = match self.fetch_registry().await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, url = %self.discovery_url, "Registry unavailable, serving fallback catalog");
                return DiscoveryOutcome::Fallback(Catalog::new(fallback_services(), 0));
            }
        };

        let catalog = parse_registry(&body);
        info!(
            total = catalog.stats.total,
            skipped = catalog.stats.skipped,
            by_network = ?catalog.stats.by_network,
            by_category = ?catalog.stats.by_category,
            "Service registry normalized"
        );
        DiscoveryOutcome::Live(catalog)
    }
}

#[async_trait]
impl ServiceDiscovery for DiscoveryClient {
    async fn discover(&self) -> AppResult<DiscoveryOutcome> {
        Ok(self.discover_catalog().await)
    }

    fn source_url(&self) -> &str {
        &self.discovery_url
    }
}

/// Normalize a registry body that was fetched successfully
pub fn parse_registry(body: &Value) -> Catalog {
    let meta = DiscoveryMeta::from_body(body);
    debug!(x402_version = ?meta.x402_version, reported_total = ?meta.total, "Registry response received");

    let Some(items) = body.get("items").and_then(|v| v.as_array()) else {
        warn!("Registry response has no items array, returning empty catalog");
        return Catalog::empty();
    };

    let services: Vec<Service> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let service = normalize_item(index, item);
            if service.is_none() {
                debug!(index, "Skipping registry item without resource or payment option");
            }
            service
        })
        .collect();

    let skipped = items.len() - services.len();
    Catalog::new(services, skipped)
}
