//! The Guru use case facade.
//!
//! Owns the one orchestrator/pipeline pair for the process and exposes
//! the operations a routing layer consumes: session creation and
//! lookup, the six stage operations (addressed by session id), and ad
//! hoc grounded queries.

use guru_core::config::GuruConfig;
use guru_core::diagnostic::{BaselineInput, DiagnosticCapability};
use guru_core::error::{GuruError, Result};
use guru_core::mentor::{
    AnswerOutcome, BaselineOutcome, FrameOutcome, GuideOutcome, MentorLoopOrchestrator,
    ObserveOutcome, ReflectOutcome,
};
use guru_core::retrieval::{
    CourseCatalog, PipelineOutput, RetrievalPipeline, SessionArchive, UserContextStore,
    VectorStore, WebSearch,
};
use guru_core::session::{DiagnosticSession, MentorStage, SessionHandle};
use guru_infrastructure::{
    MemorySessionArchive, MemoryUserContext, MemoryVectorStore, NoopWebSearch,
    StaticCourseCatalog,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Payload returned on session creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreated {
    pub session_id: String,
    pub user_id: String,
    pub domain: String,
    pub stage: MentorStage,
}

/// Process-level composition root for the diagnostic core.
///
/// Constructed exactly once with the injected collaborators and shared
/// by reference; there is no hidden global instance. Stage calls for
/// one session id must be serialized by the caller; distinct sessions
/// and queries may run concurrently.
pub struct GuruUseCase {
    orchestrator: MentorLoopOrchestrator,
    pipeline: Arc<RetrievalPipeline>,
    config: GuruConfig,
}

impl GuruUseCase {
    /// Wires the pipeline and the orchestrator over the injected
    /// backends. `diagnostic` and `archive` are optional capabilities;
    /// their absence degrades enrichment, never operation.
    pub fn new(
        config: GuruConfig,
        diagnostic: Option<Arc<dyn DiagnosticCapability>>,
        vector_store: Arc<dyn VectorStore>,
        course_catalog: Arc<dyn CourseCatalog>,
        web_search: Option<Arc<dyn WebSearch>>,
        context_store: Arc<dyn UserContextStore>,
        archive: Option<Arc<dyn SessionArchive>>,
    ) -> Self {
        let pipeline = Arc::new(RetrievalPipeline::new(
            vector_store,
            course_catalog,
            web_search,
            context_store,
            archive,
        ));
        let orchestrator =
            MentorLoopOrchestrator::new(diagnostic, pipeline.clone(), config.clone());
        Self {
            orchestrator,
            pipeline,
            config,
        }
    }

    /// Local development wiring: empty in-memory backends, no
    /// diagnostic capability.
    pub fn local(config: GuruConfig) -> Self {
        Self::new(
            config,
            None,
            Arc::new(MemoryVectorStore::new()),
            Arc::new(StaticCourseCatalog::default()),
            Some(Arc::new(NoopWebSearch)),
            Arc::new(MemoryUserContext::new()),
            Some(Arc::new(MemorySessionArchive::new())),
        )
    }

    /// Creates a new diagnostic session.
    pub async fn create_session(&self, user_id: &str, domain: &str) -> SessionCreated {
        let session = self.orchestrator.create_session(user_id, domain).await;
        let guard = session.read().await;
        SessionCreated {
            session_id: guard.id.clone(),
            user_id: guard.user_id.clone(),
            domain: guard.domain.clone(),
            stage: guard.stage,
        }
    }

    /// Snapshot of a session's current state.
    pub async fn get_session(&self, session_id: &str) -> Option<DiagnosticSession> {
        let session = self.orchestrator.get_session(session_id).await?;
        let snapshot = session.read().await.clone();
        Some(snapshot)
    }

    /// Ids of the sessions owned by a user.
    pub async fn list_sessions(&self, user_id: &str) -> Vec<String> {
        self.orchestrator.list_sessions(user_id).await
    }

    /// Stage 1: record the observation.
    pub async fn observe(&self, session_id: &str, observation: &str) -> Result<ObserveOutcome> {
        let session = self.resolve(session_id).await?;
        Ok(self.orchestrator.observe(&session, observation).await)
    }

    /// Stage 2: record the baseline.
    pub async fn baseline(&self, session_id: &str, input: BaselineInput) -> Result<BaselineOutcome> {
        let session = self.resolve(session_id).await?;
        Ok(self.orchestrator.baseline(&session, input).await)
    }

    /// Stage 3: record one answer.
    pub async fn answer_question(
        &self,
        session_id: &str,
        question_id: &str,
        answer: &str,
    ) -> Result<AnswerOutcome> {
        let session = self.resolve(session_id).await?;
        Ok(self
            .orchestrator
            .answer_question(&session, question_id, answer)
            .await)
    }

    /// Stage 4: frame the problem.
    pub async fn frame(&self, session_id: &str) -> Result<FrameOutcome> {
        let session = self.resolve(session_id).await?;
        Ok(self.orchestrator.frame(&session).await)
    }

    /// Stage 5: guided action.
    pub async fn guide(&self, session_id: &str) -> Result<GuideOutcome> {
        let session = self.resolve(session_id).await?;
        Ok(self.orchestrator.guide(&session).await)
    }

    /// Stage 6: reflect and archive.
    pub async fn reflect(&self, session_id: &str, result: &str) -> Result<ReflectOutcome> {
        let session = self.resolve(session_id).await?;
        Ok(self.orchestrator.reflect(&session, result).await)
    }

    /// Ad hoc grounded query, outside any mentor loop.
    ///
    /// `enable_web_search` overrides the configured default when set.
    pub async fn query(
        &self,
        user_id: &str,
        query: &str,
        domain: &str,
        enable_web_search: Option<bool>,
    ) -> PipelineOutput {
        let web = enable_web_search.unwrap_or(self.config.enable_web_search);
        self.pipeline.execute(user_id, query, domain, web).await
    }

    async fn resolve(&self, session_id: &str) -> Result<SessionHandle> {
        self.orchestrator
            .get_session(session_id)
            .await
            .ok_or_else(|| GuruError::not_found("session", session_id))
    }
}
