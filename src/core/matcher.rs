use crate::models::{MatchDefaults, Provider, SearchQuery, ServiceRequest};
use crate::core::{
    distance::distance_between,
    filters::{provider_covers_request, provider_matches_search},
    ranking::rank_by_distance,
};

/// Shared matching pipeline used by every data source
///
/// # Pipeline Stages
/// 1. Distance from the origin for every candidate
/// 2. Match predicate (radius and category rules)
/// 3. Stable ranking by full-precision distance
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    defaults: MatchDefaults,
}

impl Matcher {
    pub fn new(defaults: MatchDefaults) -> Self {
        Self { defaults }
    }

    pub fn with_default_radii() -> Self {
        Self {
            defaults: MatchDefaults::default(),
        }
    }

    pub fn defaults(&self) -> &MatchDefaults {
        &self.defaults
    }

    /// Providers qualifying for a client search, nearest first
    ///
    /// Distances are returned at full precision; rounding is left to the
    /// result assembler.
    pub fn search(&self, query: &SearchQuery, providers: Vec<Provider>) -> Vec<(Provider, f64)> {
        let total_candidates = providers.len();

        let mut ranked: Vec<(Provider, f64)> = providers
            .into_iter()
            .map(|provider| {
                let distance_km = distance_between(&query.origin, &provider.location);
                (provider, distance_km)
            })
            .filter(|(provider, distance_km)| {
                provider_matches_search(provider, query, *distance_km, &self.defaults)
            })
            .collect();

        rank_by_distance(&mut ranked);

        tracing::debug!(
            "Search matched {} of {} providers",
            ranked.len(),
            total_candidates
        );

        ranked
    }

    /// Requests a provider can take, nearest first
    pub fn find_opportunities(
        &self,
        provider: &Provider,
        requests: Vec<ServiceRequest>,
    ) -> Vec<ServiceRequest> {
        let mut ranked: Vec<(ServiceRequest, f64)> = requests
            .into_iter()
            .map(|request| {
                let distance_km = distance_between(&provider.location, &request.location);
                (request, distance_km)
            })
            .filter(|(request, distance_km)| {
                provider_covers_request(provider, request, *distance_km, &self.defaults)
            })
            .collect();

        rank_by_distance(&mut ranked);

        ranked.into_iter().map(|(request, _)| request).collect()
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_radii()
    }
}
