//! Stage operation outcome records.
//!
//! Each of the six stage operations returns one of these records to
//! the routing layer: the stage that ran, a status tag, and the
//! phase-specific payload.

use crate::diagnostic::{DiagnosticQuestion, GuidanceStep, ProblemFrame};
use crate::session::MentorStage;
use serde::{Deserialize, Serialize};

/// Status tag of a completed stage operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Recorded,
    Answered,
    Diagnosed,
    Guided,
    Reflected,
}

/// What the questions phase wants the caller to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerNextAction {
    /// Deliver the next question
    Ask,
    /// Enough evidence; move to framing
    Frame,
}

/// Result of the observe operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObserveOutcome {
    pub stage: MentorStage,
    pub status: StageStatus,
    /// Problem type tag, absent when classification was unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    /// Number of similar past problems seeded into the session
    pub similar_past_problems: usize,
    pub next_stage: MentorStage,
    pub next_prompt: String,
}

/// Result of the baseline operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineOutcome {
    pub stage: MentorStage,
    pub status: StageStatus,
    pub questions_generated: usize,
    pub next_stage: MentorStage,
    /// The first questions to surface to the user (at most three)
    pub questions: Vec<DiagnosticQuestion>,
}

/// Result of one answer during the questions phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub stage: MentorStage,
    pub status: StageStatus,
    pub next_action: AnswerNextAction,
    /// The next undelivered question; `None` when the list is
    /// exhausted or the loop is moving to framing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<DiagnosticQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Result of the frame operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameOutcome {
    pub stage: MentorStage,
    pub status: StageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<ProblemFrame>,
    pub next_stage: MentorStage,
    pub next_prompt: String,
}

/// Result of the guide operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideOutcome {
    pub stage: MentorStage,
    pub status: StageStatus,
    pub guidance: Vec<GuidanceStep>,
    pub next_stage: MentorStage,
    pub next_prompt: String,
}

/// Result of the reflect operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflectOutcome {
    pub stage: MentorStage,
    pub status: StageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principle: Option<String>,
    pub next_prompt: String,
    pub session_complete: bool,
}
