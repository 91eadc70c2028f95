use async_trait::async_trait;
use thiserror::Error;

use crate::models::{MatchCandidate, SearchQuery};
use crate::services::registry::RegistryError;

/// Errors a provider source can surface to its caller
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("search failed: {0}")]
    SearchFailed(#[from] RegistryError),
}

/// A directory of providers that can answer proximity searches
///
/// Implementations must return the same shape of output for the same
/// query: candidates that passed the shared match predicate, nearest
/// first, with display fields filled in.
#[async_trait]
pub trait ProviderSource: Send + Sync {
    /// Short name used in logs and the health endpoint
    fn name(&self) -> &'static str;

    async fn search(&self, query: &SearchQuery) -> Result<Vec<MatchCandidate>, SourceError>;
}
