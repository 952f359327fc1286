use anyhow::{Context, Result};
use axum::http::HeaderValue;
use serde::Deserialize;
use std::env;

pub const DEFAULT_DISCOVERY_URL: &str = "https://facilitator.payai.network/discovery/resources";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub discovery: DiscoveryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Empty means any origin
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .context("PORT must be a valid port number")?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                cors_allowed_origins: parse_origins(
                    &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
                )?,
            },
            discovery: DiscoveryConfig {
                url: env::var("DISCOVERY_URL").unwrap_or_else(|_| DEFAULT_DISCOVERY_URL.to_string()),
                timeout_secs: env::var("DISCOVERY_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "8".to_string())
                    .parse()
                    .context("DISCOVERY_TIMEOUT_SECS must be a whole number of seconds")?,
            },
            logging: LoggingConfig {
                log_dir: env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            },
        };

        if config.discovery.timeout_secs == 0 {
            anyhow::bail!("DISCOVERY_TIMEOUT_SECS must be greater than zero");
        }

        Ok(config)
    }
}

/// Comma-separated origins; `*` anywhere means allow all (empty list).
/// An origin that is not a valid header value is a configuration error.
fn parse_origins(raw: &str) -> Result<Vec<String>> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if origins.iter().any(|o| o == "*") {
        return Ok(Vec::new());
    }

    for origin in &origins {
        HeaderValue::from_str(origin)
            .with_context(|| format!("ALLOWED_ORIGINS contains an invalid origin: {:?}", origin))?;
    }

    Ok(origins)
}
