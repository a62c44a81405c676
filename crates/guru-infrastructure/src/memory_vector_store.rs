//! In-memory vector store over seeded user artifacts.
//!
//! Stands in for the real embedding store in local mode and in tests:
//! same trait, keyword-overlap scoring instead of vector similarity.

use crate::scoring::keyword_overlap;
use async_trait::async_trait;
use guru_core::Result;
use guru_core::retrieval::{
    ContentKind, RetrievalResult, SourceOrigin, SourceSignal, VectorStore,
};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// One indexed user artifact.
#[derive(Debug, Clone)]
pub struct ArtifactEntry {
    pub user_id: String,
    pub url: String,
    pub title: String,
    /// "document", "code", "note", ...
    pub category: String,
    pub content: String,
}

/// Seedable in-memory artifact index.
#[derive(Default)]
pub struct MemoryVectorStore {
    artifacts: RwLock<Vec<ArtifactEntry>>,
}

impl MemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes one artifact.
    pub async fn add_artifact(&self, entry: ArtifactEntry) {
        self.artifacts.write().await.push(entry);
    }

    fn content_kind(category: &str) -> ContentKind {
        if category == "code" {
            ContentKind::Code
        } else {
            ContentKind::Document
        }
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn search_artifacts(&self, user_id: &str, query: &str) -> Result<Vec<SourceSignal>> {
        let artifacts = self.artifacts.read().await;
        let mut signals = Vec::new();
        for entry in artifacts.iter().filter(|e| e.user_id == user_id) {
            let score = keyword_overlap(query, &format!("{} {}", entry.title, entry.content));
            if score > 0.0 {
                signals.push(SourceSignal {
                    url: entry.url.clone(),
                    origin: SourceOrigin::Internal,
                    category: entry.category.clone(),
                    title: entry.title.clone(),
                    relevance_score: score,
                    snippet: Some(entry.content.chars().take(120).collect()),
                });
            }
        }
        tracing::debug!(user_id, count = signals.len(), "memory vector store: search");
        Ok(signals)
    }

    async fn fetch(&self, source: &SourceSignal, _query: &str) -> Result<Vec<RetrievalResult>> {
        let artifacts = self.artifacts.read().await;
        let Some(entry) = artifacts.iter().find(|e| e.url == source.url) else {
            tracing::debug!(url = %source.url, "memory vector store: source no longer indexed");
            return Ok(vec![]);
        };

        let mut metadata = HashMap::new();
        metadata.insert("source".to_string(), entry.title.clone());
        Ok(vec![RetrievalResult {
            source_id: entry.url.clone(),
            content: entry.content.clone(),
            content_type: Self::content_kind(&entry.category),
            relevance_score: source.relevance_score,
            metadata,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual() -> ArtifactEntry {
        ArtifactEntry {
            user_id: "alice".to_string(),
            url: "file://alice/car-manual.md".to_string(),
            title: "Car maintenance manual".to_string(),
            category: "document".to_string(),
            content: "Battery, starter and alternator troubleshooting for the car.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_search_is_scoped_to_the_user() {
        let store = MemoryVectorStore::new();
        store.add_artifact(manual()).await;

        assert_eq!(store.search_artifacts("alice", "car battery").await.unwrap().len(), 1);
        assert!(store.search_artifacts("bob", "car battery").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unrelated_query_finds_nothing() {
        let store = MemoryVectorStore::new();
        store.add_artifact(manual()).await;
        assert!(store.search_artifacts("alice", "sourdough recipe").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_round_trips_content() {
        let store = MemoryVectorStore::new();
        store.add_artifact(manual()).await;

        let signals = store.search_artifacts("alice", "battery").await.unwrap();
        let results = store.fetch(&signals[0], "battery").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content_type, ContentKind::Document);
        assert!(results[0].content.contains("Battery"));
    }

    #[tokio::test]
    async fn test_code_category_maps_to_code_kind() {
        let store = MemoryVectorStore::new();
        store
            .add_artifact(ArtifactEntry {
                user_id: "alice".to_string(),
                url: "file://alice/build.rs".to_string(),
                title: "build script".to_string(),
                category: "code".to_string(),
                content: "fn main() { compile() }".to_string(),
            })
            .await;

        let signals = store.search_artifacts("alice", "build script").await.unwrap();
        let results = store.fetch(&signals[0], "build").await.unwrap();
        assert_eq!(results[0].content_type, ContentKind::Code);
    }
}
