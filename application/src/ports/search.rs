//! Search provider port

use super::generation::ProviderError;
use agenda_domain::SearchHit;
use async_trait::async_trait;

/// Web search service used to ground speaker suggestions.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Top organic results for `query`; at most a small fixed number.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ProviderError>;
}

/// Search disabled: always returns no results.
pub struct NoSearch;

#[async_trait]
impl SearchProvider for NoSearch {
    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, ProviderError> {
        Ok(Vec::new())
    }
}
