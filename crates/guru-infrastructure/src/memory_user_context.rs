//! In-memory user context store.
//!
//! Holds profiles, recall patches, past problems and the inquiry log
//! that the archivist grounds against.

use async_trait::async_trait;
use guru_core::Result;
use guru_core::diagnostic::PastProblem;
use guru_core::retrieval::{InquiryHistory, UserContextStore, UserProfile};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct InquiryRecord {
    query: String,
    resolved: bool,
}

/// Seedable in-memory store for everything the archivist looks up.
#[derive(Default)]
pub struct MemoryUserContext {
    profiles: RwLock<HashMap<String, UserProfile>>,
    recall: RwLock<HashMap<String, Vec<String>>>,
    past_problems: RwLock<HashMap<String, Vec<PastProblem>>>,
    inquiries: RwLock<HashMap<String, Vec<InquiryRecord>>>,
}

impl MemoryUserContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_profile(&self, user_id: &str, profile: UserProfile) {
        self.profiles.write().await.insert(user_id.to_string(), profile);
    }

    pub async fn add_recall_patch(&self, user_id: &str, patch: impl Into<String>) {
        self.recall
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .push(patch.into());
    }

    pub async fn add_past_problem(&self, user_id: &str, problem: PastProblem) {
        self.past_problems
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .push(problem);
    }

    /// Records that the user asked `query`, and whether it got resolved.
    pub async fn record_inquiry(&self, user_id: &str, query: &str, resolved: bool) {
        self.inquiries
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .push(InquiryRecord {
                query: query.to_lowercase(),
                resolved,
            });
    }
}

#[async_trait]
impl UserContextStore for MemoryUserContext {
    async fn profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn recall_patches(&self, user_id: &str, _query: &str) -> Result<Vec<String>> {
        Ok(self.recall.read().await.get(user_id).cloned().unwrap_or_default())
    }

    async fn past_problems(&self, user_id: &str, _query: &str) -> Result<Vec<PastProblem>> {
        Ok(self
            .past_problems
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn inquiry_history(&self, user_id: &str, query: &str) -> Result<InquiryHistory> {
        let inquiries = self.inquiries.read().await;
        let Some(records) = inquiries.get(user_id) else {
            return Ok(InquiryHistory::default());
        };

        let needle = query.to_lowercase();
        let repeat = records.iter().find(|r| r.query == needle);
        let related = records
            .iter()
            .filter(|r| r.query != needle)
            .map(|r| r.query.clone())
            .collect();

        Ok(InquiryHistory {
            is_repeat: repeat.is_some(),
            was_resolved: repeat.map(|r| r.resolved).unwrap_or(false),
            related_queries: related,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_user_has_no_profile_and_no_history() {
        let store = MemoryUserContext::new();
        assert!(store.profile("nobody").await.unwrap().is_none());
        let history = store.inquiry_history("nobody", "anything").await.unwrap();
        assert!(!history.is_repeat);
    }

    #[tokio::test]
    async fn test_repeat_inquiry_is_case_insensitive() {
        let store = MemoryUserContext::new();
        store.record_inquiry("alice", "Car won't start", false).await;

        let history = store.inquiry_history("alice", "car WON'T start").await.unwrap();
        assert!(history.is_repeat);
        assert!(!history.was_resolved);
    }

    #[tokio::test]
    async fn test_resolved_repeat_and_related_queries() {
        let store = MemoryUserContext::new();
        store.record_inquiry("alice", "flaky tests", true).await;
        store.record_inquiry("alice", "slow build", false).await;

        let history = store.inquiry_history("alice", "flaky tests").await.unwrap();
        assert!(history.is_repeat);
        assert!(history.was_resolved);
        assert_eq!(history.related_queries, vec!["slow build".to_string()]);
    }

    #[tokio::test]
    async fn test_seeded_profile_and_recall_round_trip() {
        let store = MemoryUserContext::new();
        store
            .set_profile(
                "alice",
                UserProfile {
                    learning_style: Some("hands_on".to_string()),
                    ..UserProfile::default()
                },
            )
            .await;
        store.add_recall_patch("alice", "prefers short answers").await;

        assert!(store.profile("alice").await.unwrap().is_some());
        assert_eq!(store.recall_patches("alice", "q").await.unwrap().len(), 1);
    }
}
