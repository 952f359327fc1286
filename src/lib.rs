// PayAI Discovery - catalog of x402 payment-gated services

pub mod config;
pub mod discovery;   // Registry client, normalization, filtering
pub mod middleware;
pub mod models;
pub mod payment;     // x402 registry wire types
pub mod routes;
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use discovery::{DiscoveryClient, DiscoveryOutcome, ServiceDiscovery};
pub use models::AppState;
pub use types::{Category, Currency, Service};

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
