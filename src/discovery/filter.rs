// Category / network filtering over an already-fetched catalog

use crate::types::Service;

/// UI sentinel meaning "no category selected"
pub const ALL_CATEGORIES: &str = "All";
/// UI sentinel meaning "no network selected"
pub const ALL_NETWORKS: &str = "all";

fn is_unset(value: Option<&str>, sentinel: &str) -> bool {
    match value.map(str::trim) {
        None => true,
        Some(v) => v.is_empty() || v.eq_ignore_ascii_case(sentinel),
    }
}

/// Keep services whose category and network match exactly. An unset filter
/// matches everything.
pub fn filter_services(services: &[Service], category: Option<&str>, network: Option<&str>) -> Vec<Service> {
    let any_category = is_unset(category, ALL_CATEGORIES);
    let any_network = is_unset(network, ALL_NETWORKS);

    services
        .iter()
        .filter(|s| any_category || category.map(str::trim) == Some(s.category.as_str()))
        .filter(|s| any_network || network.map(str::trim) == Some(s.price.network.as_str()))
        .cloned()
        .collect()
}
