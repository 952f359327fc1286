use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use payai_discovery::{config::Config, routes::create_router, utils::init_logger, AppState, DiscoveryClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Keep the file writer alive for the life of the server
    let _log_guard = init_logger(&config.logging);
    info!("Configuration loaded: {:?}", config.server);

    let discovery = DiscoveryClient::from_config(&config.discovery)?;
    info!(
        url = %discovery.discovery_url(),
        timeout_secs = config.discovery.timeout_secs,
        "Discovery client ready"
    );

    // Create shared state
    let state = AppState {
        config: config.clone(),
        discovery: Arc::new(discovery),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::new(host, config.server.port);
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
