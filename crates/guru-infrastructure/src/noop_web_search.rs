//! A no-op web search backend for when no web provider is configured.

use async_trait::async_trait;
use guru_core::Result;
use guru_core::retrieval::{RetrievalResult, SourceSignal, WebSearch};

/// Always finds nothing. Wiring this keeps the web seam exercised
/// without a network dependency.
pub struct NoopWebSearch;

#[async_trait]
impl WebSearch for NoopWebSearch {
    async fn search(&self, _query: &str) -> Result<Vec<SourceSignal>> {
        Ok(vec![])
    }

    async fn fetch(&self, _source: &SourceSignal) -> Result<Vec<RetrievalResult>> {
        Ok(vec![])
    }
}
