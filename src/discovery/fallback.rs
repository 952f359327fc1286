// Static catalog served when the registry cannot be reached

use serde_json::json;

use crate::types::{Category, Currency, Price, Service, ServiceStatus};

pub const FALLBACK_ID_PREFIX: &str = "fallback-";

struct FallbackEntry {
    slug: &'static str,
    name: &'static str,
    description: &'static str,
    endpoint: &'static str,
    network: &'static str,
    asset: &'static str,
    atomic_amount: &'static str,
    amount: &'static str,
    currency: Currency,
}

const FALLBACK_ENTRIES: &[FallbackEntry] = &[
    FallbackEntry {
        slug: "echo-solana-devnet",
        name: "Echo Test (Solana Devnet)",
        description: "Echo service for testing x402 payments on Solana devnet",
        endpoint: "https://x402.payai.network/api/solana-devnet/paid-content",
        network: "solana-devnet",
        asset: "4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU",
        atomic_amount: "10000",
        amount: "0.01",
        currency: Currency::USDC,
    },
    FallbackEntry {
        slug: "echo-base-sepolia",
        name: "Echo Test (Base Sepolia)",
        description: "Echo service for testing x402 payments on Base Sepolia",
        endpoint: "https://x402.payai.network/api/base-sepolia/paid-content",
        network: "base-sepolia",
        asset: "0x036CbD53842c5426634e7929541eC2318f3dCF7e",
        atomic_amount: "10000",
        amount: "0.01",
        currency: Currency::USDC,
    },
    FallbackEntry {
        slug: "premium-solana-devnet",
        name: "Premium Test Content (Solana Devnet)",
        description: "Premium test content gated by an x402 payment on Solana devnet",
        endpoint: "https://x402.payai.network/api/solana-devnet/premium",
        network: "solana-devnet",
        asset: "4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU",
        atomic_amount: "100000",
        amount: "0.10",
        currency: Currency::USDC,
    },
];

/// Known test services spanning the test networks
pub fn fallback_services() -> Vec<Service> {
    FALLBACK_ENTRIES
        .iter()
        .map(|entry| Service {
            id: format!("{}{}", FALLBACK_ID_PREFIX, entry.slug),
            name: entry.name.to_string(),
            description: entry.description.to_string(),
            endpoint: entry.endpoint.to_string(),
            price: Price {
                amount: entry.amount.to_string(),
                currency: entry.currency,
                network: entry.network.to_string(),
            },
            category: Category::Development,
            status: ServiceStatus::Online,
            accepted_payment_options: vec![json!({
                "asset": entry.asset,
                "payTo": "",
                "network": entry.network,
                "maxAmountRequired": entry.atomic_amount,
                "scheme": "exact",
                "mimeType": "application/json",
            })],
            last_updated: None,
        })
        .collect()
}

pub fn is_fallback_service(service: &Service) -> bool {
    service.id.starts_with(FALLBACK_ID_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::{format_atomic_amount, infer_currency};
    use std::collections::HashSet;

    #[test]
    fn test_fallback_catalog_is_recognizable() {
        let services = fallback_services();
        assert!(!services.is_empty());

        for service in &services {
            assert!(is_fallback_service(service));
            assert_eq!(service.category, Category::Development);
            assert!(service.name.contains("Test"));
        }

        let ids: HashSet<_> = services.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), services.len());

        let networks: HashSet<_> = services.iter().map(|s| s.price.network.as_str()).collect();
        assert!(networks.contains("solana-devnet"));
        assert!(networks.contains("base-sepolia"));
    }

    #[test]
    fn test_fallback_prices_match_their_payment_options() {
        for service in fallback_services() {
            let option = &service.accepted_payment_options[0];
            assert_eq!(format_atomic_amount(option.get("maxAmountRequired")), service.price.amount);
            assert_eq!(
                infer_currency(option["asset"].as_str(), option["network"].as_str()),
                service.price.currency
            );
        }
    }
}
