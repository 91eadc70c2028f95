use crate::models::{MatchDefaults, Provider, SearchQuery, ServiceRequest};

/// Check if a provider can take a service request
///
/// Provider-seeks-requests mode: the request must still be pending, its
/// category must be one the provider offers, and it must lie within the
/// provider's own service radius.
#[inline]
pub fn provider_covers_request(
    provider: &Provider,
    request: &ServiceRequest,
    distance_km: f64,
    defaults: &MatchDefaults,
) -> bool {
    if !request.is_pending() {
        return false;
    }

    if !provider.offers(&request.category) {
        return false;
    }

    distance_km <= provider.radius_or(defaults.service_radius_km)
}

/// Check if a provider qualifies for a client search
///
/// Client-seeks-providers mode: the provider must be inside the search
/// radius and also inside its own service radius. A non-empty category
/// filter must share at least one category with the provider.
#[inline]
pub fn provider_matches_search(
    provider: &Provider,
    query: &SearchQuery,
    distance_km: f64,
    defaults: &MatchDefaults,
) -> bool {
    let search_radius = query.radius.unwrap_or(defaults.search_radius_km);
    if distance_km > search_radius {
        return false;
    }

    if distance_km > provider.radius_or(defaults.service_radius_km) {
        return false;
    }

    match query.category_filter() {
        Some(categories) => categories.iter().any(|c| provider.offers(c)),
        None => true,
    }
}
