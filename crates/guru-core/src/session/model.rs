//! Diagnostic session domain model.
//!
//! This module contains the core `DiagnosticSession` entity plus the
//! `MentorStage` state enum that drives the six-phase mentor loop.

use crate::diagnostic::{BaselineInput, DiagnosticQuestion, GuidanceStep, PastProblem, ProblemFrame};
use crate::retrieval::RetrievalResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The six phases of the mentor loop.
///
/// A session starts at `Observe` and moves forward one phase per stage
/// operation; `Reflect` is terminal for a problem instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentorStage {
    /// User describes the problem
    Observe,
    /// Establish what works and the constraints
    Baseline,
    /// Iterative diagnostic questioning
    Questions,
    /// Problem diagnosis
    Frame,
    /// Action guidance
    Guide,
    /// Principle extraction
    Reflect,
}

impl fmt::Display for MentorStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Observe => "observe",
            Self::Baseline => "baseline",
            Self::Questions => "questions",
            Self::Frame => "frame",
            Self::Guide => "guide",
            Self::Reflect => "reflect",
        };
        write!(f, "{name}")
    }
}

/// A single user diagnostic conversation.
///
/// The session accumulates evidence as the mentor loop advances:
/// the observation and baseline are set once, questions are
/// append-only, answers are keyed by question id, and the frame,
/// guidance and reflection arrive in the later phases. The enrichment
/// caches (`past_problems`, `relevant_docs`, `model_reasoning`) are
/// filled opportunistically and may stay empty when the corresponding
/// collaborator is unavailable.
///
/// Only the orchestrator mutates a session, and callers must serialize
/// stage calls per session id. Distinct sessions are independent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticSession {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Problem domain tag (e.g. "car_repair", "python")
    pub domain: String,
    /// Current phase of the mentor loop
    pub stage: MentorStage,
    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last stage operation
    pub updated_at: DateTime<Utc>,

    /// The user's description of the problem (set once, last write wins)
    pub observation: Option<String>,
    /// What works and what the constraints are (set once)
    pub baseline: Option<BaselineInput>,
    /// Generated diagnostic questions, in delivery order (append-only)
    pub questions: Vec<DiagnosticQuestion>,
    /// Answers keyed by question id
    pub answers: HashMap<String, String>,
    /// The problem diagnosis (set once per framing)
    pub frame: Option<ProblemFrame>,
    /// Ordered action steps from the guide phase
    pub guidance: Vec<GuidanceStep>,
    /// Extracted principle (set once at closure)
    pub reflection: Option<String>,

    /// Similar past problems seeded at the observe phase
    #[serde(default)]
    pub past_problems: Vec<PastProblem>,
    /// Documents retrieved for this session
    #[serde(default)]
    pub relevant_docs: Vec<RetrievalResult>,
    /// Opaque reasoning notes from the model collaborator
    #[serde(default)]
    pub model_reasoning: serde_json::Value,
}

impl DiagnosticSession {
    /// Creates a fresh session at the `Observe` stage.
    pub fn new(id: impl Into<String>, user_id: impl Into<String>, domain: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            domain: domain.into(),
            stage: MentorStage::Observe,
            created_at: now,
            updated_at: now,
            observation: None,
            baseline: None,
            questions: Vec::new(),
            answers: HashMap::new(),
            frame: None,
            guidance: Vec::new(),
            reflection: None,
            past_problems: Vec::new(),
            relevant_docs: Vec::new(),
            model_reasoning: serde_json::Value::Null,
        }
    }

    /// Advances the stage and bumps the update timestamp.
    pub(crate) fn advance_to(&mut self, stage: MentorStage) {
        self.stage = stage;
        self.updated_at = Utc::now();
    }

    /// The next undelivered question under strictly sequential
    /// delivery: position = number of answered questions. Returns
    /// `None` once the question list is exhausted.
    pub fn next_question(&self) -> Option<&DiagnosticQuestion> {
        self.questions.get(self.answers.len())
    }
}
