//! Registry item normalization
//!
//! Pure functions that turn one raw registry item into a [`Service`]. Names,
//! descriptions and categories are heuristics over third-party data; the
//! tests below pin their output for known hostnames so it stays stable.

use serde_json::Value;
use url::Url;

use crate::payment::PaymentRequirements;
use crate::types::{Category, Price, Service, ServiceStatus};

/// Supplied descriptions longer than this are not used as a name
const MAX_NAME_FROM_DESCRIPTION: usize = 50;
const MAX_ID_SLUG_LEN: usize = 64;

/// Category keyword rules, in priority order
const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (
        Category::Tokens,
        &["token", "mint", "swap", "defi", "coin", "nft", "airdrop", "dex", "stake", "wallet"],
    ),
    (
        Category::AI,
        &["ai", "gpt", "llm", "openai", "agent", "chat", "inference", "prompt", "model", "image"],
    ),
    (
        Category::Gaming,
        &["game", "gaming", "play", "casino", "lottery", "arcade", "quest"],
    ),
    (
        Category::Social,
        &["social", "twitter", "tweet", "farcaster", "profile", "post", "community"],
    ),
    (
        Category::Data,
        &["data", "weather", "oracle", "feed", "analytics", "news", "price", "stats", "search"],
    ),
    (
        Category::Development,
        &["echo", "test", "dev", "debug", "demo", "sandbox", "ping", "hello"],
    ),
];

/// Map one registry item to a service, or `None` if it lacks a resource URL
/// or a primary payment option.
pub fn normalize_item(index: usize, item: &Value) -> Option<Service> {
    let resource = item
        .get("resource")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())?;

    let accepts = item.get("accepts").and_then(|v| v.as_array())?;
    let primary = PaymentRequirements::from_value(accepts.first()?)?;

    let metadata = item.get("metadata");
    let metadata_text = |key: &str| {
        metadata
            .and_then(|m| m.get(key))
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };
    let supplied_description = primary
        .description
        .as_deref()
        .or_else(|| metadata_text("description"))
        .or_else(|| metadata_text("summary"));

    let description = derive_description(resource, supplied_description);
    let category = categorize(resource, &description);

    Some(Service {
        id: service_id(resource, index),
        name: derive_name(resource, supplied_description),
        description,
        endpoint: resource.to_string(),
        price: Price {
            amount: primary.display_amount(),
            currency: primary.currency(),
            network: primary.network_or_unknown().to_string(),
        },
        category,
        status: ServiceStatus::Online,
        accepted_payment_options: accepts.clone(),
        last_updated: item
            .get("lastUpdated")
            .and_then(|v| v.as_str())
            .map(String::from),
    })
}

/// `{host+path slug}-{index}`; unique within one registry response
pub fn service_id(resource: &str, index: usize) -> String {
    let basis = match Url::parse(resource) {
        Ok(url) => format!("{}{}", url.host_str().unwrap_or_default(), url.path()),
        Err(_) => resource.to_string(),
    };

    let mut slug = slugify(&basis);
    if slug.is_empty() {
        slug.push_str("service");
    }
    format!("{}-{}", slug, index)
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    slug.truncate(MAX_ID_SLUG_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Hostname without a leading `www.`
fn hostname(url: &Url) -> Option<String> {
    url.host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.strip_prefix("www.").unwrap_or(h).to_lowercase())
}

pub fn derive_name(resource: &str, supplied_description: Option<&str>) -> String {
    if let Some(description) = supplied_description.map(str::trim) {
        if !description.is_empty() && description.chars().count() <= MAX_NAME_FROM_DESCRIPTION {
            return description.to_string();
        }
    }

    let Ok(url) = Url::parse(resource) else {
        return "Unknown Service".to_string();
    };
    let Some(host) = hostname(&url) else {
        return "Unknown Service".to_string();
    };

    let base = capitalize(host.split('.').next().unwrap_or(&host));
    let hint = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last());

    match hint {
        Some(segment) => {
            let segment = urlencoding::decode(segment).unwrap_or(std::borrow::Cow::Borrowed(segment));
            format!("{} ({})", base, segment)
        }
        None => base,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn derive_description(resource: &str, supplied_description: Option<&str>) -> String {
    if let Some(description) = supplied_description.map(str::trim).filter(|d| !d.is_empty()) {
        return description.to_string();
    }

    let host = Url::parse(resource).ok().and_then(|url| hostname(&url));
    match host {
        Some(h) if h.contains("echo") => "Echo service for testing x402 payments".to_string(),
        Some(h) if h.contains("weather") => "Weather data served over x402 payments".to_string(),
        Some(h) if h.contains("news") => "News feed served over x402 payments".to_string(),
        Some(h) if h.contains("api") => format!("API service hosted at {}", h),
        Some(h) => format!("Payment-enabled service hosted at {}", h),
        None => "Payment-enabled x402 service".to_string(),
    }
}

/// First category whose keywords match a word of the endpoint or description
pub fn categorize(endpoint: &str, description: &str) -> Category {
    let text = format!("{} {}", endpoint, description).to_lowercase();
    let words: Vec<&str> = text
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    CATEGORY_RULES
        .iter()
        .find(|(_, keywords)| {
            keywords
                .iter()
                .any(|keyword| words.iter().any(|word| keyword_matches(keyword, word)))
        })
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

// Short keywords ("ai", "nft") must match a whole word, or "paid" would be AI.
fn keyword_matches(keyword: &str, word: &str) -> bool {
    word == keyword || (keyword.len() >= 4 && word.starts_with(keyword))
}
