use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::core::{Matcher, ResultAssembler};
use crate::models::{MatchCandidate, Provider, SearchQuery};
use crate::services::source::{ProviderSource, SourceError};

/// Errors that can occur when talking to the provider registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Live provider source backed by the remote registry
///
/// Each search is a single range query. The registry's answer is treated
/// as a pre-filter: the shared matcher re-applies the radius and category
/// rules locally before the results are assembled.
pub struct RegistrySource {
    base_url: String,
    api_key: Option<String>,
    client: Client,
    matcher: Matcher,
    assembler: ResultAssembler,
}

impl RegistrySource {
    /// Create a new registry client
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout: Duration,
        matcher: Matcher,
        assembler: ResultAssembler,
    ) -> Result<Self, RegistryError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
            matcher,
            assembler,
        })
    }

    /// Build the range query URL for a search
    fn search_url(&self, query: &SearchQuery) -> String {
        let mut url = format!(
            "{}/providers/search?lat={}&lng={}",
            self.base_url.trim_end_matches('/'),
            query.origin.lat,
            query.origin.lng
        );

        if let Some(radius) = query.radius {
            url.push_str(&format!("&radius={}", radius));
        }

        if let Some(categories) = query.category_filter() {
            url.push_str("&services=");
            url.push_str(&urlencoding::encode(&categories.join(",")));
        }

        url
    }

    /// Fetch raw provider records for a query
    pub async fn fetch_providers(&self, query: &SearchQuery) -> Result<Vec<Provider>, RegistryError> {
        let url = self.search_url(query);

        tracing::debug!("Querying provider registry: {}", url);

        let mut request = self.client.get(&url);
        if let Some(api_key) = &self.api_key {
            request = request.header("X-Api-Key", api_key);
        }

        let response = request.send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(RegistryError::Unauthorized);
        }
        if !status.is_success() {
            return Err(RegistryError::ApiError(format!(
                "Failed to query providers: {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        let records = match &json {
            Value::Array(records) => records,
            other => other
                .get("providers")
                .and_then(|p| p.as_array())
                .ok_or_else(|| RegistryError::InvalidResponse("Missing providers array".into()))?,
        };

        let providers: Vec<Provider> = records
            .iter()
            .filter_map(|record| match serde_json::from_value(record.clone()) {
                Ok(provider) => Some(provider),
                Err(e) => {
                    tracing::warn!("Skipping malformed provider record: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!(
            "Registry returned {} providers ({} records)",
            providers.len(),
            records.len()
        );

        Ok(providers)
    }
}

#[async_trait]
impl ProviderSource for RegistrySource {
    fn name(&self) -> &'static str {
        "live"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<MatchCandidate>, SourceError> {
        let providers = self.fetch_providers(query).await?;
        let ranked = self.matcher.search(query, providers);
        Ok(self.assembler.assemble_all(ranked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;

    fn create_source(base_url: &str) -> RegistrySource {
        RegistrySource::new(
            base_url.to_string(),
            Some("test_key".to_string()),
            Duration::from_secs(5),
            Matcher::with_default_radii(),
            ResultAssembler::seeded(1),
        )
        .unwrap()
    }

    #[test]
    fn test_registry_client_creation() {
        let source = create_source("https://registry.test/v1/");

        assert_eq!(source.base_url, "https://registry.test/v1/");
        assert_eq!(source.api_key.as_deref(), Some("test_key"));
        assert_eq!(source.name(), "live");
    }

    #[test]
    fn test_search_url() {
        let source = create_source("https://registry.test/v1/");
        let origin = Coordinate::new(41.9028, 12.4964);

        assert_eq!(
            source.search_url(&SearchQuery::new(origin)),
            "https://registry.test/v1/providers/search?lat=41.9028&lng=12.4964"
        );

        let query = SearchQuery::new(origin)
            .with_radius(25.0)
            .with_categories(["Plumbing", "Pulizie casa"]);
        assert_eq!(
            source.search_url(&query),
            "https://registry.test/v1/providers/search?lat=41.9028&lng=12.4964&radius=25&services=Plumbing%2CPulizie%20casa"
        );
    }
}
