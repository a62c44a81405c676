//! Researcher agent: retrieval and content extraction.
//!
//! Second pipeline stage. Fetches the content behind each discovered
//! source, dispatching on the source's origin. Partial success is the
//! normal case: a failed fetch is logged and dropped, never fatal.

use super::model::{RetrievalBuckets, SourceOrigin, SourceSignal};
use super::store::{CourseCatalog, VectorStore, WebSearch};
use std::sync::Arc;

/// Fetches content for discovered sources and groups the results into
/// the four fixed buckets.
pub struct ResearcherAgent {
    vector_store: Arc<dyn VectorStore>,
    course_catalog: Arc<dyn CourseCatalog>,
    web_search: Option<Arc<dyn WebSearch>>,
}

impl ResearcherAgent {
    pub fn new(
        vector_store: Arc<dyn VectorStore>,
        course_catalog: Arc<dyn CourseCatalog>,
        web_search: Option<Arc<dyn WebSearch>>,
    ) -> Self {
        Self {
            vector_store,
            course_catalog,
            web_search,
        }
    }

    /// Fetches every source independently. Origins without a fetch
    /// routine (`GitHub`, `ArXiv`) are skipped.
    ///
    /// Fetches currently run one at a time; the per-source calls are
    /// logically independent, so results would survive unordered
    /// completion unchanged.
    pub async fn retrieve(
        &self,
        _user_id: &str,
        sources: &[SourceSignal],
        query: &str,
    ) -> RetrievalBuckets {
        tracing::info!(count = sources.len(), "researcher: retrieving content");

        let mut buckets = RetrievalBuckets::default();

        for source in sources {
            let fetched = match source.origin {
                SourceOrigin::Internal => self.vector_store.fetch(source, query).await,
                SourceOrigin::Course => self.course_catalog.fetch(source).await,
                SourceOrigin::Web => match &self.web_search {
                    Some(web) => web.fetch(source).await,
                    None => continue,
                },
                SourceOrigin::GitHub | SourceOrigin::ArXiv => {
                    tracing::debug!(url = %source.url, origin = ?source.origin, "researcher: no fetch routine, skipping");
                    continue;
                }
            };

            match fetched {
                Ok(results) => {
                    for result in results {
                        buckets.push(result);
                    }
                }
                Err(err) => {
                    tracing::warn!(url = %source.url, error = %err, "researcher: fetch failed, dropping source");
                }
            }
        }

        tracing::info!(total = buckets.total(), "researcher: retrieval complete");
        buckets
    }
}
