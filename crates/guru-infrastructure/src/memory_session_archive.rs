//! In-memory session archive.
//!
//! Stores the problem/solution/principle chunks of completed sessions
//! and serves similarity lookups for seeding new sessions.

use crate::scoring::keyword_overlap;
use async_trait::async_trait;
use guru_core::Result;
use guru_core::diagnostic::PastProblem;
use guru_core::retrieval::{ChunkKind, SessionArchive, SessionChunk};
use std::cmp::Ordering;
use tokio::sync::RwLock;

/// Chunk store with upsert semantics: one chunk per (session, kind).
#[derive(Default)]
pub struct MemorySessionArchive {
    chunks: RwLock<Vec<SessionChunk>>,
}

impl MemorySessionArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored chunks.
    pub async fn len(&self) -> usize {
        self.chunks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.chunks.read().await.is_empty()
    }
}

#[async_trait]
impl SessionArchive for MemorySessionArchive {
    async fn similar_past_problems(
        &self,
        _user_id: &str,
        topic: &str,
        limit: usize,
    ) -> Result<Vec<PastProblem>> {
        let chunks = self.chunks.read().await;

        let mut problems = Vec::new();
        for chunk in chunks.iter().filter(|c| c.kind == ChunkKind::Problem) {
            let relevance = if chunk.domain == topic {
                1.0
            } else {
                keyword_overlap(topic, &chunk.content)
            };
            if relevance == 0.0 {
                continue;
            }

            let principle = chunks
                .iter()
                .find(|c| c.session_id == chunk.session_id && c.kind == ChunkKind::Principle)
                .map(|c| c.content.clone())
                .filter(|content| !content.is_empty());

            problems.push(PastProblem {
                session_id: chunk.session_id.clone(),
                domain: chunk.domain.clone(),
                problem: chunk.content.clone(),
                principle,
                relevance,
            });
        }

        problems.sort_by(|a, b| {
            b.relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(Ordering::Equal)
        });
        problems.truncate(limit);
        Ok(problems)
    }

    async fn upsert_session(&self, incoming: Vec<SessionChunk>) -> Result<()> {
        let mut chunks = self.chunks.write().await;
        for chunk in incoming {
            chunks.retain(|c| !(c.session_id == chunk.session_id && c.kind == chunk.kind));
            chunks.push(chunk);
        }
        Ok(())
    }
}
