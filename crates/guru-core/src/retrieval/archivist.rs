//! Archivist agent: context grounding.
//!
//! Third pipeline stage. Grounds the query in what is known about the
//! user (profile, recall, past problems, inquiry history) and applies
//! the refusal gates.

use super::model::{GroundingContext, InquiryHistory, RetrievalBuckets, UserProfile};
use super::store::UserContextStore;
use crate::diagnostic::PastProblem;
use std::sync::Arc;

/// Builds a `GroundingContext` from four independent lookups.
///
/// Each lookup degrades independently: a failed one contributes the
/// empty value and is logged, it never aborts grounding.
pub struct ArchivistAgent {
    context_store: Arc<dyn UserContextStore>,
}

impl ArchivistAgent {
    pub fn new(context_store: Arc<dyn UserContextStore>) -> Self {
        Self { context_store }
    }

    /// Grounds the query in user context and derives `should_refuse`.
    ///
    /// The retrieval buckets are accepted for parity with the pipeline
    /// contract; the current gates do not inspect them.
    pub async fn ground(
        &self,
        user_id: &str,
        query: &str,
        _retrieval: &RetrievalBuckets,
    ) -> GroundingContext {
        tracing::info!(user_id, "archivist: grounding in user context");

        let profile = self
            .lookup("profile", self.context_store.profile(user_id).await)
            .flatten();
        let recall_patches = self
            .lookup("recall", self.context_store.recall_patches(user_id, query).await)
            .unwrap_or_default();
        let past_problems: Vec<PastProblem> = self
            .lookup(
                "past_problems",
                self.context_store.past_problems(user_id, query).await,
            )
            .unwrap_or_default();
        let inquiry = self
            .lookup(
                "inquiry_history",
                self.context_store.inquiry_history(user_id, query).await,
            )
            .unwrap_or_default();

        let should_refuse = Self::check_response_gates(profile.as_ref(), &inquiry);
        tracing::info!(should_refuse, "archivist: grounding complete");

        GroundingContext {
            profile,
            recall_patches,
            past_problems,
            inquiry,
            should_refuse,
        }
    }

    fn lookup<T>(&self, what: &str, result: crate::error::Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(lookup = what, error = %err, "archivist: lookup failed, using empty value");
                None
            }
        }
    }

    /// The refusal gates. `true` means ask/refuse instead of respond.
    ///
    /// Gate 1: unknown user (no learning-style signal).
    /// Gate 2: repeat of a prior unresolved inquiry.
    /// Further gates are an extension point; add them here.
    fn check_response_gates(profile: Option<&UserProfile>, inquiry: &InquiryHistory) -> bool {
        let unknown_user = profile
            .and_then(|p| p.learning_style.as_deref())
            .is_none();
        let unresolved_repeat = inquiry.is_repeat && !inquiry.was_resolved;

        unknown_user || unresolved_repeat
    }
}
