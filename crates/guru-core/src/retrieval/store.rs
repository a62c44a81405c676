//! Backend capability traits consumed by the retrieval agents.
//!
//! Each trait is a narrow seam to an external system (vector store,
//! course index, web search, user context, session archive). The core
//! never talks to a network or a database directly; it only consumes
//! these traits.

use super::model::{InquiryHistory, RetrievalResult, SessionChunk, SourceSignal, UserProfile};
use crate::diagnostic::PastProblem;
use crate::error::Result;
use async_trait::async_trait;

/// Vector store over the user's own indexed artifacts.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Searches the user's artifacts for sources relevant to the query.
    async fn search_artifacts(&self, user_id: &str, query: &str) -> Result<Vec<SourceSignal>>;

    /// Fetches the content behind one discovered source.
    async fn fetch(&self, source: &SourceSignal, query: &str) -> Result<Vec<RetrievalResult>>;
}

/// Index over the course platform.
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    /// Searches the course index.
    async fn search(&self, query: &str) -> Result<Vec<SourceSignal>>;

    /// Fetches syllabus/lesson content for one course source.
    async fn fetch(&self, source: &SourceSignal) -> Result<Vec<RetrievalResult>>;
}

/// Web search backend.
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Searches the web.
    async fn search(&self, query: &str) -> Result<Vec<SourceSignal>>;

    /// Fetches and extracts the snippet behind one web source.
    async fn fetch(&self, source: &SourceSignal) -> Result<Vec<RetrievalResult>>;
}

/// User context lookups used by the archivist to ground a query.
#[async_trait]
pub trait UserContextStore: Send + Sync {
    /// The user's learning profile, if known.
    async fn profile(&self, user_id: &str) -> Result<Option<UserProfile>>;

    /// Recall patches (memory fragments) relevant to the query.
    async fn recall_patches(&self, user_id: &str, query: &str) -> Result<Vec<String>>;

    /// Past problems similar to the query.
    async fn past_problems(&self, user_id: &str, query: &str) -> Result<Vec<PastProblem>>;

    /// Whether this inquiry repeats an earlier one, and how that went.
    async fn inquiry_history(&self, user_id: &str, query: &str) -> Result<InquiryHistory>;
}

/// Archive of completed diagnostic sessions, queried to seed new
/// sessions and appended to when a loop closes.
#[async_trait]
pub trait SessionArchive: Send + Sync {
    /// Retrieves past problems similar to a topic or domain tag,
    /// capped at `limit`.
    async fn similar_past_problems(
        &self,
        user_id: &str,
        topic: &str,
        limit: usize,
    ) -> Result<Vec<PastProblem>>;

    /// Stores the retrievable chunks of a completed session.
    async fn upsert_session(&self, chunks: Vec<SessionChunk>) -> Result<()>;
}
