//! The four-stage retrieval pipeline.
//!
//! Sequences discoverer, researcher, archivist and thinker into one
//! call producing a `PipelineOutput`, with a confidence-gated decision
//! on whether to respond, ask for clarification, or refuse.

use super::archivist::ArchivistAgent;
use super::discoverer::DiscovererAgent;
use super::model::{
    GroundingContext, NextAction, PipelineOutput, PipelineStatus, SessionChunk,
};
use super::researcher::ResearcherAgent;
use super::store::{CourseCatalog, SessionArchive, UserContextStore, VectorStore, WebSearch};
use super::thinker::{GROUNDED_THRESHOLD, ThinkerAgent};
use crate::diagnostic::PastProblem;
use crate::error::Result;
use std::sync::Arc;

/// Discoverer -> Researcher -> Archivist -> Thinker, strictly in
/// sequence. Also independently callable for ad hoc grounded queries
/// outside the mentor loop.
///
/// The pipeline never propagates an error to its caller: every failure
/// surfaces as a `PipelineOutput` with an explicit next action.
pub struct RetrievalPipeline {
    discoverer: DiscovererAgent,
    researcher: ResearcherAgent,
    archivist: ArchivistAgent,
    thinker: ThinkerAgent,
    archive: Option<Arc<dyn SessionArchive>>,
}

impl RetrievalPipeline {
    /// Wires the four agents over the injected backends.
    pub fn new(
        vector_store: Arc<dyn VectorStore>,
        course_catalog: Arc<dyn CourseCatalog>,
        web_search: Option<Arc<dyn WebSearch>>,
        context_store: Arc<dyn UserContextStore>,
        archive: Option<Arc<dyn SessionArchive>>,
    ) -> Self {
        Self {
            discoverer: DiscovererAgent::new(
                vector_store.clone(),
                course_catalog.clone(),
                web_search.clone(),
            ),
            researcher: ResearcherAgent::new(vector_store, course_catalog, web_search),
            archivist: ArchivistAgent::new(context_store),
            thinker: ThinkerAgent::new(),
            archive,
        }
    }

    /// Executes the full pipeline for one query.
    pub async fn execute(
        &self,
        user_id: &str,
        query: &str,
        domain: &str,
        enable_web_search: bool,
    ) -> PipelineOutput {
        tracing::info!(query, domain, "pipeline: starting retrieval");

        match self
            .execute_inner(user_id, query, domain, enable_web_search)
            .await
        {
            Ok(output) => output,
            Err(err) => {
                tracing::error!(query, error = %err, "pipeline: unhandled failure");
                PipelineOutput::failed(query)
            }
        }
    }

    async fn execute_inner(
        &self,
        user_id: &str,
        query: &str,
        _domain: &str,
        enable_web_search: bool,
    ) -> Result<PipelineOutput> {
        // Step 1: DISCOVERER. Empty discovery short-circuits the rest.
        let sources = self.discoverer.discover(user_id, query, enable_web_search).await;
        if sources.is_empty() {
            return Ok(PipelineOutput::no_sources(query));
        }

        // Step 2: RESEARCHER
        let retrieval = self.researcher.retrieve(user_id, &sources, query).await;

        // Step 3: ARCHIVIST, then the refusal gates. The thinker is
        // not consulted for a gated query.
        let grounding = self.archivist.ground(user_id, query, &retrieval).await;
        if grounding.should_refuse {
            let guided = self.generate_clarifying_question(query, &grounding);
            return Ok(PipelineOutput::gated(query, sources.len(), &retrieval, guided));
        }

        // Step 4: THINKER
        let synthesis = self.thinker.synthesize(&retrieval, &grounding, query).await;

        tracing::info!(
            confidence = synthesis.grounding_confidence,
            "pipeline: retrieval complete"
        );

        Ok(PipelineOutput {
            status: PipelineStatus::Success,
            query: query.to_string(),
            sources_found: sources.len(),
            documents_retrieved: retrieval.documents.len(),
            courses_retrieved: retrieval.courses.len(),
            is_grounded: synthesis.grounding_confidence > GROUNDED_THRESHOLD,
            grounding_confidence: synthesis.grounding_confidence,
            guided_question: None,
            synthesis_strategy: Some(synthesis.strategy),
            contradictions: synthesis.contradictions,
            next_action: NextAction::Respond,
        })
    }

    fn generate_clarifying_question(&self, query: &str, grounding: &GroundingContext) -> String {
        if grounding.inquiry.is_repeat && !grounding.inquiry.was_resolved {
            format!("We looked at '{query}' before without resolving it. What changed since last time?")
        } else {
            format!("I need more context about '{query}'. Can you clarify your specific goal?")
        }
    }

    /// Past-problem lookup used by the mentor loop to seed a new
    /// session. Degrades to empty when the archive is absent or fails.
    pub async fn past_problem_seed(
        &self,
        user_id: &str,
        topic: &str,
        limit: usize,
    ) -> Vec<PastProblem> {
        let Some(archive) = &self.archive else {
            return Vec::new();
        };
        match archive.similar_past_problems(user_id, topic, limit).await {
            Ok(problems) => problems,
            Err(err) => {
                tracing::warn!(topic, error = %err, "pipeline: past-problem lookup failed, seeding empty");
                Vec::new()
            }
        }
    }

    /// Upserts the retrievable chunks of a completed session.
    pub async fn store_session_chunks(&self, chunks: Vec<SessionChunk>) -> Result<()> {
        match &self.archive {
            Some(archive) => archive.upsert_session(chunks).await,
            None => Ok(()),
        }
    }
}
