//! Diagnostic collaborator seam.
//!
//! The mentor loop never reasons about a problem itself; it delegates
//! to an external diagnostic capability (an LLM-backed service in
//! production, a scripted double in tests). This module defines the
//! records exchanged over that seam and the capability trait.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The baseline established in phase two: what still works, what the
/// constraints are, how far the problem reaches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaselineInput {
    /// What currently works
    #[serde(skip_serializing_if = "Option::is_none")]
    pub what_works: Option<String>,

    /// Constraints on testing/fixing (can't shut down, risky, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<String>,

    /// Scope of the problem
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Free-form extra fields from the caller
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub extra: serde_json::Value,
}

/// One diagnostic question, delivered to the user in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticQuestion {
    /// Stable question identifier, used as the answer key
    pub id: String,
    /// The question text
    pub text: String,
    /// Why this question narrows the problem space
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl DiagnosticQuestion {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            rationale: None,
        }
    }
}

/// The problem diagnosis produced at the frame phase.
///
/// Opaque to the orchestrator: it stores and forwards the frame
/// without validating its content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemFrame {
    /// What the problem is (and is not)
    pub summary: String,
    /// Identified root cause
    pub root_cause: String,
    /// Collaborator's confidence in the diagnosis, 0.0 - 1.0
    pub confidence: f32,
    /// Caveats and alternative hypotheses
    #[serde(default)]
    pub caveats: Vec<String>,
}

/// One guided action step: the action, the reasoning behind it, and
/// what success looks like.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidanceStep {
    /// Position in the guidance sequence, starting at 1
    pub order: usize,
    /// The action to take
    pub action: String,
    /// Why this action comes first (teach, don't just execute)
    pub reasoning: String,
    /// What to look for, what success looks like
    pub expectation: String,
    /// Risk warning, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<String>,
}

/// A previously solved (or attempted) problem, retrieved to seed a new
/// session with history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PastProblem {
    /// Session the problem was recorded under
    pub session_id: String,
    /// Domain tag of that session
    pub domain: String,
    /// The original problem statement
    pub problem: String,
    /// The principle extracted at reflection, if the loop completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principle: Option<String>,
    /// Similarity to the current inquiry, 0.0 - 1.0
    pub relevance: f32,
}

/// External diagnostic reasoning capability.
///
/// Every method is a suspension point backed by a remote or local
/// model. Implementations must be side-effect free except for
/// `update_diagnosis`, which is explicitly side-effecting and whose
/// result is not retained by the caller.
#[async_trait]
pub trait DiagnosticCapability: Send + Sync {
    /// Tags the observation with a problem type, or `None` when the
    /// observation does not match a known type.
    async fn classify(&self, observation: &str, domain: &str) -> Result<Option<String>>;

    /// Generates ordered diagnostic questions designed to narrow the
    /// problem space.
    async fn generate_questions(
        &self,
        observation: Option<&str>,
        baseline: Option<&BaselineInput>,
        domain: &str,
        past_problems: &[PastProblem],
    ) -> Result<Vec<DiagnosticQuestion>>;

    /// Updates the collaborator's internal diagnostic model with the
    /// answers so far. Side-effecting only; no retained return.
    async fn update_diagnosis(
        &self,
        observation: Option<&str>,
        baseline: Option<&BaselineInput>,
        answers: &HashMap<String, String>,
        domain: &str,
    ) -> Result<()>;

    /// Synthesizes the accumulated evidence into a diagnosis.
    async fn frame_problem(
        &self,
        observation: Option<&str>,
        baseline: Option<&BaselineInput>,
        answers: &HashMap<String, String>,
        domain: &str,
        past_problems: &[PastProblem],
    ) -> Result<ProblemFrame>;

    /// Decides the ordered action steps the user should take.
    async fn decide_action(
        &self,
        frame: Option<&ProblemFrame>,
        baseline: Option<&BaselineInput>,
        domain: &str,
    ) -> Result<Vec<GuidanceStep>>;

    /// Extracts a reusable principle from the outcome of the guidance.
    async fn extract_principle(
        &self,
        guidance: &[GuidanceStep],
        result: &str,
        frame: Option<&ProblemFrame>,
        domain: &str,
    ) -> Result<String>;
}
