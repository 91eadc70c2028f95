use async_trait::async_trait;

use crate::core::{Matcher, ResultAssembler};
use crate::models::{MatchCandidate, Provider, SearchQuery};
use crate::services::fixtures;
use crate::services::source::{ProviderSource, SourceError};

/// Provider source over an in-memory fixture set
///
/// Runs the same matcher and assembler as the live source, so the two are
/// interchangeable behind [`ProviderSource`].
pub struct SyntheticSource {
    providers: Vec<Provider>,
    matcher: Matcher,
    assembler: ResultAssembler,
}

impl SyntheticSource {
    pub fn new(providers: Vec<Provider>, matcher: Matcher, assembler: ResultAssembler) -> Self {
        Self {
            providers,
            matcher,
            assembler,
        }
    }

    /// Synthetic source over the Rome demo directory
    pub fn demo() -> Self {
        Self::new(
            fixtures::rome_directory(),
            Matcher::with_default_radii(),
            ResultAssembler::new(),
        )
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }
}

#[async_trait]
impl ProviderSource for SyntheticSource {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<MatchCandidate>, SourceError> {
        let ranked = self.matcher.search(query, self.providers.clone());
        Ok(self.assembler.assemble_all(ranked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;

    const ROME: Coordinate = Coordinate::new(41.9028, 12.4964);

    #[test]
    fn test_demo_search_is_ranked() {
        let source = SyntheticSource::demo();

        let result = tokio_test::block_on(source.search(&SearchQuery::new(ROME))).unwrap();

        assert!(!result.is_empty());
        for pair in result.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
        assert!(result.len() < source.providers().len());
    }

    #[test]
    fn test_demo_search_by_category() {
        let source = SyntheticSource::demo();
        let query = SearchQuery::new(ROME).with_categories(["Locksmith"]);

        let result = tokio_test::block_on(source.search(&query)).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].provider.id, "cg-008");
    }
}
