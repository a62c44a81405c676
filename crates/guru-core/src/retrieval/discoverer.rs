//! Discoverer agent: search and discovery.
//!
//! First pipeline stage. Gathers candidate sources from the user's
//! local artifacts, the course index, and (optionally) the web, then
//! ranks them by relevance.

use super::model::SourceSignal;
use super::store::{CourseCatalog, VectorStore, WebSearch};
use std::cmp::Ordering;
use std::sync::Arc;

/// Finds candidate information sources across three independent
/// source classes. A failing class contributes nothing; discovery is
/// only empty when every class came up empty.
pub struct DiscovererAgent {
    vector_store: Arc<dyn VectorStore>,
    course_catalog: Arc<dyn CourseCatalog>,
    web_search: Option<Arc<dyn WebSearch>>,
}

impl DiscovererAgent {
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

    /// Searches all enabled source classes and returns the merged
    /// signals sorted descending by relevance.
    ///
    /// The sort is stable and the classes are appended in the order
    /// local artifacts, courses, web, so on equal scores internal and
    /// course sources rank ahead of web sources.
    ///
    /// An empty result is a valid, non-error outcome.
    pub async fn discover(
        &self,
        user_id: &str,
        query: &str,
        enable_web_search: bool,
    ) -> Vec<SourceSignal> {
        tracing::info!(query, "discoverer: searching for sources");

        let mut sources = Vec::new();

        match self.vector_store.search_artifacts(user_id, query).await {
            Ok(local) => sources.extend(local),
            Err(err) => {
                tracing::warn!(error = %err, "discoverer: local artifact search failed, skipping class");
            }
        }

        match self.course_catalog.search(query).await {
            Ok(courses) => sources.extend(courses),
            Err(err) => {
                tracing::warn!(error = %err, "discoverer: course search failed, skipping class");
            }
        }

        if enable_web_search {
            if let Some(web) = &self.web_search {
                match web.search(query).await {
                    Ok(web_sources) => sources.extend(web_sources),
                    Err(err) => {
                        tracing::warn!(error = %err, "discoverer: web search failed, skipping class");
                    }
                }
            }
        }

        sources.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(Ordering::Equal)
        });

        tracing::info!(count = sources.len(), "discoverer: discovery complete");
        sources
    }
}
