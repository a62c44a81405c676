//! The mentor loop orchestrator.
//!
//! Drives a `DiagnosticSession` through the six phases:
//! observe -> baseline -> questions -> frame -> guide -> reflect.
//!
//! The orchestrator is the only writer of a session. Every collaborator
//! call sits behind a failure boundary: an unavailable or failing
//! capability degrades that stage's enrichment to the empty value and
//! never prevents the stage transition.

use super::outcome::{
    AnswerNextAction, AnswerOutcome, BaselineOutcome, FrameOutcome, GuideOutcome, ObserveOutcome,
    ReflectOutcome, StageStatus,
};
use crate::config::GuruConfig;
use crate::diagnostic::{BaselineInput, DiagnosticCapability};
use crate::retrieval::{ChunkKind, RetrievalPipeline, SessionChunk};
use crate::session::{MentorStage, SessionHandle, SessionStore};
use std::sync::Arc;

/// Six-state state machine driving diagnostic sessions.
///
/// Exactly one orchestrator exists per process, owned by the
/// composition root and shared by reference; it holds the session
/// store, the optional diagnostic capability and the retrieval
/// pipeline handle.
pub struct MentorLoopOrchestrator {
    sessions: SessionStore,
    diagnostic: Option<Arc<dyn DiagnosticCapability>>,
    pipeline: Arc<RetrievalPipeline>,
    config: GuruConfig,
}

impl MentorLoopOrchestrator {
    pub fn new(
        diagnostic: Option<Arc<dyn DiagnosticCapability>>,
        pipeline: Arc<RetrievalPipeline>,
        config: GuruConfig,
    ) -> Self {
        Self {
            sessions: SessionStore::new(),
            diagnostic,
            pipeline,
            config,
        }
    }

    /// Creates a new session at the observe stage.
    pub async fn create_session(&self, user_id: &str, domain: &str) -> SessionHandle {
        let session = self.sessions.create(user_id, domain).await;
        tracing::info!(
            session_id = %session.read().await.id,
            user_id,
            domain,
            "mentor: session created"
        );
        session
    }

    /// Looks up a session by id.
    pub async fn get_session(&self, session_id: &str) -> Option<SessionHandle> {
        self.sessions.get(session_id).await
    }

    /// Lists the session ids owned by a user.
    pub async fn list_sessions(&self, user_id: &str) -> Vec<String> {
        self.sessions.list_for_user(user_id).await
    }

    /// Stage 1: record the user's observation.
    ///
    /// Classification failure is non-fatal; the past-problem seed is
    /// capped by configuration. Calling observe twice overwrites the
    /// observation (last write wins) and re-runs the enrichment.
    pub async fn observe(&self, session: &SessionHandle, observation: &str) -> ObserveOutcome {
        let (session_id, user_id, domain) = {
            let mut guard = session.write().await;
            guard.observation = Some(observation.to_string());
            guard.advance_to(MentorStage::Observe);
            (guard.id.clone(), guard.user_id.clone(), guard.domain.clone())
        };
        tracing::info!(session_id = %session_id, "mentor: observe");

        let classification = match &self.diagnostic {
            Some(diag) => match diag.classify(observation, &domain).await {
                Ok(problem_type) => problem_type,
                Err(err) => {
                    tracing::warn!(session_id = %session_id, error = %err, "mentor: classification failed, omitting problem type");
                    None
                }
            },
            None => None,
        };

        // Seed with similar past problems, indexed by problem type
        // when we have one, otherwise by domain.
        let topic = classification.as_deref().unwrap_or(&domain);
        let past_problems = self
            .pipeline
            .past_problem_seed(&user_id, topic, self.config.past_problem_limit)
            .await;
        let seeded = past_problems.len();

        {
            let mut guard = session.write().await;
            guard.past_problems = past_problems;
            guard.advance_to(MentorStage::Baseline);
        }

        ObserveOutcome {
            stage: MentorStage::Observe,
            status: StageStatus::Recorded,
            classification,
            similar_past_problems: seeded,
            next_stage: MentorStage::Baseline,
            next_prompt: "What currently works? (Establish the baseline.)".to_string(),
        }
    }

    /// Stage 2: establish the baseline and generate the diagnostic
    /// questions. Without a diagnostic capability the question list
    /// stays empty; the caller must handle that degenerate case.
    pub async fn baseline(&self, session: &SessionHandle, input: BaselineInput) -> BaselineOutcome {
        let (session_id, domain, observation, past_problems) = {
            let mut guard = session.write().await;
            guard.baseline = Some(input.clone());
            guard.advance_to(MentorStage::Baseline);
            (
                guard.id.clone(),
                guard.domain.clone(),
                guard.observation.clone(),
                guard.past_problems.clone(),
            )
        };
        tracing::info!(session_id = %session_id, "mentor: baseline");

        let questions = match &self.diagnostic {
            Some(diag) => match diag
                .generate_questions(observation.as_deref(), Some(&input), &domain, &past_problems)
                .await
            {
                Ok(questions) => questions,
                Err(err) => {
                    tracing::warn!(session_id = %session_id, error = %err, "mentor: question generation failed, continuing with none");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let surfaced: Vec<_> = questions.iter().take(3).cloned().collect();
        let generated = questions.len();

        {
            let mut guard = session.write().await;
            guard.questions.extend(questions);
            guard.advance_to(MentorStage::Questions);
        }

        BaselineOutcome {
            stage: MentorStage::Baseline,
            status: StageStatus::Recorded,
            questions_generated: generated,
            next_stage: MentorStage::Questions,
            questions: surfaced,
        }
    }

    /// Stage 3: record one answer.
    ///
    /// Advances to framing once enough questions are answered,
    /// regardless of answer content. Questions are delivered strictly
    /// sequentially; answering past the end of the list yields a
    /// structured `next_question: None`, never a panic.
    pub async fn answer_question(
        &self,
        session: &SessionHandle,
        question_id: &str,
        answer: &str,
    ) -> AnswerOutcome {
        let (session_id, domain, observation, baseline, answers) = {
            let mut guard = session.write().await;
            guard
                .answers
                .insert(question_id.to_string(), answer.to_string());
            guard.advance_to(MentorStage::Questions);
            (
                guard.id.clone(),
                guard.domain.clone(),
                guard.observation.clone(),
                guard.baseline.clone(),
                guard.answers.clone(),
            )
        };
        tracing::info!(session_id = %session_id, question_id, "mentor: answer recorded");

        // Side-effecting only; the result is not retained.
        if let Some(diag) = &self.diagnostic {
            if let Err(err) = diag
                .update_diagnosis(observation.as_deref(), baseline.as_ref(), &answers, &domain)
                .await
            {
                tracing::warn!(session_id = %session_id, error = %err, "mentor: diagnosis update failed, continuing");
            }
        }

        if answers.len() >= self.config.answers_before_frame {
            let mut guard = session.write().await;
            guard.advance_to(MentorStage::Frame);
            return AnswerOutcome {
                stage: MentorStage::Questions,
                status: StageStatus::Answered,
                next_action: AnswerNextAction::Frame,
                next_question: None,
                message: Some("I think I understand the problem now.".to_string()),
            };
        }

        let next_question = session.read().await.next_question().cloned();
        AnswerOutcome {
            stage: MentorStage::Questions,
            status: StageStatus::Answered,
            next_action: AnswerNextAction::Ask,
            next_question,
            message: None,
        }
    }

    /// Stage 4: frame the problem. The frame content is opaque to the
    /// orchestrator; the transition to guide is unconditional.
    pub async fn frame(&self, session: &SessionHandle) -> FrameOutcome {
        let (session_id, domain, observation, baseline, answers, past_problems) = {
            let mut guard = session.write().await;
            guard.advance_to(MentorStage::Frame);
            (
                guard.id.clone(),
                guard.domain.clone(),
                guard.observation.clone(),
                guard.baseline.clone(),
                guard.answers.clone(),
                guard.past_problems.clone(),
            )
        };
        tracing::info!(session_id = %session_id, "mentor: frame");

        let frame = match &self.diagnostic {
            Some(diag) => match diag
                .frame_problem(
                    observation.as_deref(),
                    baseline.as_ref(),
                    &answers,
                    &domain,
                    &past_problems,
                )
                .await
            {
                Ok(frame) => Some(frame),
                Err(err) => {
                    tracing::warn!(session_id = %session_id, error = %err, "mentor: framing failed, continuing without a frame");
                    None
                }
            },
            None => None,
        };

        {
            let mut guard = session.write().await;
            guard.frame = frame.clone();
            guard.advance_to(MentorStage::Guide);
        }

        FrameOutcome {
            stage: MentorStage::Frame,
            status: StageStatus::Diagnosed,
            frame,
            next_stage: MentorStage::Guide,
            next_prompt: "Here's what I recommend you try first...".to_string(),
        }
    }

    /// Stage 5: decide the guided action steps.
    pub async fn guide(&self, session: &SessionHandle) -> GuideOutcome {
        let (session_id, domain, frame, baseline) = {
            let mut guard = session.write().await;
            guard.advance_to(MentorStage::Guide);
            (
                guard.id.clone(),
                guard.domain.clone(),
                guard.frame.clone(),
                guard.baseline.clone(),
            )
        };
        tracing::info!(session_id = %session_id, "mentor: guide");

        let guidance = match &self.diagnostic {
            Some(diag) => match diag
                .decide_action(frame.as_ref(), baseline.as_ref(), &domain)
                .await
            {
                Ok(steps) => steps,
                Err(err) => {
                    tracing::warn!(session_id = %session_id, error = %err, "mentor: action decision failed, continuing without guidance");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        {
            let mut guard = session.write().await;
            guard.guidance = guidance.clone();
            guard.advance_to(MentorStage::Reflect);
        }
        tracing::info!(session_id = %session_id, steps = guidance.len(), "mentor: guidance ready");

        GuideOutcome {
            stage: MentorStage::Guide,
            status: StageStatus::Guided,
            guidance,
            next_stage: MentorStage::Reflect,
            next_prompt: "Try the first step and let me know what happens.".to_string(),
        }
    }

    /// Stage 6: extract the principle and archive the completed
    /// session. The archive write is fire-and-forget: a failure is
    /// logged and never surfaced to the caller.
    pub async fn reflect(&self, session: &SessionHandle, result: &str) -> ReflectOutcome {
        let (session_id, domain, guidance, frame) = {
            let mut guard = session.write().await;
            guard.advance_to(MentorStage::Reflect);
            (
                guard.id.clone(),
                guard.domain.clone(),
                guard.guidance.clone(),
                guard.frame.clone(),
            )
        };
        tracing::info!(session_id = %session_id, "mentor: reflect");

        let reflection = match &self.diagnostic {
            Some(diag) => match diag
                .extract_principle(&guidance, result, frame.as_ref(), &domain)
                .await
            {
                Ok(principle) => Some(principle),
                Err(err) => {
                    tracing::warn!(session_id = %session_id, error = %err, "mentor: principle extraction failed, continuing without one");
                    None
                }
            },
            None => None,
        };

        {
            let mut guard = session.write().await;
            guard.reflection = reflection.clone();
        }

        self.store_session(session).await;

        ReflectOutcome {
            stage: MentorStage::Reflect,
            status: StageStatus::Reflected,
            principle: reflection,
            next_prompt: "That's a valuable lesson. Next time you see X, remember Y.".to_string(),
            session_complete: true,
        }
    }

    /// Chunks the completed session into three retrievable pieces and
    /// hands them to the archive, enriching future past-problem
    /// lookups for the same kind of issue.
    async fn store_session(&self, session: &SessionHandle) {
        let guard = session.read().await;
        let solution = serde_json::to_string(&guard.guidance).unwrap_or_else(|err| {
            tracing::warn!(session_id = %guard.id, error = %err, "mentor: guidance serialization failed, archiving empty solution");
            "[]".to_string()
        });

        let chunks = vec![
            SessionChunk {
                kind: ChunkKind::Problem,
                content: guard.observation.clone().unwrap_or_default(),
                session_id: guard.id.clone(),
                domain: guard.domain.clone(),
            },
            SessionChunk {
                kind: ChunkKind::Solution,
                content: solution,
                session_id: guard.id.clone(),
                domain: guard.domain.clone(),
            },
            SessionChunk {
                kind: ChunkKind::Principle,
                content: guard.reflection.clone().unwrap_or_default(),
                session_id: guard.id.clone(),
                domain: guard.domain.clone(),
            },
        ];
        let session_id = guard.id.clone();
        drop(guard);

        match self.pipeline.store_session_chunks(chunks).await {
            Ok(()) => {
                tracing::info!(session_id = %session_id, "mentor: session archived for future retrieval");
            }
            Err(err) => {
                tracing::warn!(session_id = %session_id, error = %err, "mentor: session archiving failed");
            }
        }
    }
}
