// x402 registry wire shapes (facilitator discovery endpoint)
//
// The registry payload is loosely structured, so everything here reads from
// `serde_json::Value` and tolerates missing or mistyped fields.

use serde_json::Value;

use crate::types::Currency;

/// Atomic units per whole token (6-decimal fixed point)
const ATOMIC_UNITS_PER_TOKEN: u128 = 1_000_000;
/// Atomic units per displayed cent
const ATOMIC_UNITS_PER_CENT: u128 = ATOMIC_UNITS_PER_TOKEN / 100;

/// Known USDC mints/contracts
pub const KNOWN_USDC_ASSETS: &[&str] = &[
    // Solana mainnet
    "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
    // Solana devnet
    "4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU",
    // Base
    "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
    // Base Sepolia
    "0x036CbD53842c5426634e7929541eC2318f3dCF7e",
];

/// Top-level fields of a discovery response, other than `items`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveryMeta {
    pub x402_version: Option<u64>,
    pub total: Option<u64>,
}

impl DiscoveryMeta {
    pub fn from_body(body: &Value) -> Self {
        Self {
            x402_version: body.get("x402Version").and_then(|v| v.as_u64()),
            total: body
                .get("pagination")
                .and_then(|p| p.get("total"))
                .and_then(|v| v.as_u64()),
        }
    }
}

/// Lenient view of one `accepts` entry
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequirements {
    pub scheme: Option<String>,
    pub network: Option<String>,
    pub asset: Option<String>,
    pub pay_to: Option<String>,
    /// Kept as raw JSON: registries send both strings and numbers here
    pub max_amount_required: Option<Value>,
    pub mime_type: Option<String>,
    pub description: Option<String>,
}

impl PaymentRequirements {
    /// Returns `None` unless `value` is a JSON object
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let text = |key: &str| {
            object
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        Some(Self {
            scheme: text("scheme"),
            network: text("network"),
            asset: text("asset"),
            pay_to: text("payTo"),
            max_amount_required: object.get("maxAmountRequired").cloned(),
            mime_type: text("mimeType"),
            description: text("description"),
        })
    }

    pub fn network_or_unknown(&self) -> &str {
        self.network.as_deref().unwrap_or("unknown")
    }

    pub fn display_amount(&self) -> String {
        format_atomic_amount(self.max_amount_required.as_ref())
    }

    pub fn currency(&self) -> Currency {
        infer_currency(self.asset.as_deref(), self.network.as_deref())
    }
}

/// Render 6-decimal atomic units as a two-digit decimal, rounding half up.
/// Anything that is not a non-negative integer renders as "0.00".
pub fn format_atomic_amount(raw: Option<&Value>) -> String {
    let atomic: u128 = match raw {
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        // exact digits (arbitrary_precision), so wide integers survive; floats fail to parse
        Some(Value::Number(n)) => n.to_string().parse().unwrap_or(0),
        _ => 0,
    };

    let cents = atomic.saturating_add(ATOMIC_UNITS_PER_CENT / 2) / ATOMIC_UNITS_PER_CENT;
    format!("{}.{:02}", cents / 100, cents % 100)
}

pub fn is_known_usdc(asset: &str) -> bool {
    KNOWN_USDC_ASSETS.iter().any(|address| {
        if address.starts_with("0x") {
            address.eq_ignore_ascii_case(asset)
        } else {
            // Solana mints are base58 and case-sensitive
            *address == asset
        }
    })
}

/// Best-effort currency guess: a known USDC asset wins, otherwise the chain
/// family decides (Solana networks → SOL, everything else → USDC).
pub fn infer_currency(asset: Option<&str>, network: Option<&str>) -> Currency {
    if asset.map(is_known_usdc).unwrap_or(false) {
        return Currency::USDC;
    }

    let on_solana = network
        .map(|n| n.to_lowercase().contains("solana"))
        .unwrap_or(false);

    if on_solana {
        Currency::SOL
    } else {
        Currency::USDC
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_atomic_amount() {
        assert_eq!(format_atomic_amount(Some(&json!("1500000"))), "1.50");
        assert_eq!(format_atomic_amount(Some(&json!("10000"))), "0.01");
        assert_eq!(format_atomic_amount(Some(&json!("5000"))), "0.01");
        assert_eq!(format_atomic_amount(Some(&json!("4999"))), "0.00");
        assert_eq!(format_atomic_amount(Some(&json!("123456789"))), "123.46");
        assert_eq!(format_atomic_amount(Some(&json!(2_000_000))), "2.00");
    }

    #[test]
    fn test_format_atomic_amount_wide_numbers_match_strings() {
        let wide: Value = serde_json::from_str("18446744073709551616").unwrap();
        assert_eq!(format_atomic_amount(Some(&wide)), "18446744073709.55");
        assert_eq!(
            format_atomic_amount(Some(&wide)),
            format_atomic_amount(Some(&json!("18446744073709551616")))
        );
    }

    #[test]
    fn test_format_atomic_amount_rejects_garbage() {
        assert_eq!(format_atomic_amount(None), "0.00");
        assert_eq!(format_atomic_amount(Some(&json!("abc"))), "0.00");
        assert_eq!(format_atomic_amount(Some(&json!("-100"))), "0.00");
        assert_eq!(format_atomic_amount(Some(&json!(1.5))), "0.00");
        assert_eq!(format_atomic_amount(Some(&json!(null))), "0.00");
    }

    #[test]
    fn test_infer_currency() {
        assert_eq!(
            infer_currency(Some("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"), Some("solana-mainnet")),
            Currency::USDC
        );
        assert_eq!(
            infer_currency(Some("0x833589fcd6edb6e08f4c7c32d4f71b54bda02913"), Some("base")),
            Currency::USDC
        );
        assert_eq!(
            infer_currency(Some("So11111111111111111111111111111111111111112"), Some("solana")),
            Currency::SOL
        );
        assert_eq!(infer_currency(Some("0xdeadbeef"), Some("base-sepolia")), Currency::USDC);
        assert_eq!(infer_currency(None, None), Currency::USDC);
    }

    #[test]
    fn test_solana_mint_comparison_is_case_sensitive() {
        assert!(!is_known_usdc("epjfwdd5aufqssqem2qn1xzybapc8g4wegGkzwytdt1v"));
    }

    #[test]
    fn test_payment_requirements_from_value() {
        let accepts = json!({
            "asset": "0xabc",
            "payTo": "0xdef",
            "network": "base",
            "maxAmountRequired": "250000",
            "scheme": "exact",
            "mimeType": "application/json"
        });

        let requirements = PaymentRequirements::from_value(&accepts).unwrap();
        assert_eq!(requirements.pay_to.as_deref(), Some("0xdef"));
        assert_eq!(requirements.display_amount(), "0.25");
        assert_eq!(requirements.network_or_unknown(), "base");
        assert!(requirements.description.is_none());

        assert!(PaymentRequirements::from_value(&json!("exact")).is_none());
        assert_eq!(
            PaymentRequirements::from_value(&json!({})).unwrap().network_or_unknown(),
            "unknown"
        );
    }

    #[test]
    fn test_discovery_meta_from_body() {
        let meta = DiscoveryMeta::from_body(&json!({
            "items": [],
            "pagination": { "total": 42 },
            "x402Version": 1
        }));
        assert_eq!(meta.total, Some(42));
        assert_eq!(meta.x402_version, Some(1));

        assert_eq!(DiscoveryMeta::from_body(&json!({})), DiscoveryMeta::default());
    }
}
