//! Retrieval domain models.
//!
//! Immutable records passed between the four pipeline agents, plus the
//! terminal `PipelineOutput` returned to the caller.

use crate::diagnostic::PastProblem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where a discovered source lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceOrigin {
    /// User's own indexed artifacts (documents, code, notes)
    Internal,
    /// GitHub repositories
    GitHub,
    /// ArXiv papers
    ArXiv,
    /// General web
    Web,
    /// Course platform
    Course,
}

/// A discovered candidate source, prior to fetching its body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSignal {
    pub url: String,
    pub origin: SourceOrigin,
    pub category: String,
    pub title: String,
    /// Relevance to the query, 0.0 - 1.0
    pub relevance_score: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

/// Kind of content fetched from a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Document,
    Code,
    Course,
    Web,
}

/// Content fetched from one source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// Url of the source this content came from
    pub source_id: String,
    pub content: String,
    pub content_type: ContentKind,
    pub relevance_score: f32,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Retrieved content grouped into the four fixed buckets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalBuckets {
    pub documents: Vec<RetrievalResult>,
    pub code: Vec<RetrievalResult>,
    pub courses: Vec<RetrievalResult>,
    pub web: Vec<RetrievalResult>,
}

impl RetrievalBuckets {
    /// Routes one result into its bucket by content kind.
    pub fn push(&mut self, result: RetrievalResult) {
        match result.content_type {
            ContentKind::Document => self.documents.push(result),
            ContentKind::Code => self.code.push(result),
            ContentKind::Course => self.courses.push(result),
            ContentKind::Web => self.web.push(result),
        }
    }

    /// Total number of retrieved items across all buckets.
    pub fn total(&self) -> usize {
        self.documents.len() + self.code.len() + self.courses.len() + self.web.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// A user's learning profile, as far as the context store knows it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    /// How the user prefers to learn; absence means we do not really
    /// know this user yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_depth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_level: Option<String>,
    #[serde(default)]
    pub frustrations: Vec<String>,
}

/// Whether and how the current inquiry relates to earlier ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InquiryHistory {
    /// The user already asked this (or something close to it)
    pub is_repeat: bool,
    /// The earlier inquiry reached a resolution
    pub was_resolved: bool,
    #[serde(default)]
    pub related_queries: Vec<String>,
}

/// Consolidated user context produced by the archivist.
///
/// Consumed once by the pipeline and the thinker, then discarded;
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingContext {
    pub profile: Option<UserProfile>,
    pub recall_patches: Vec<String>,
    pub past_problems: Vec<PastProblem>,
    pub inquiry: InquiryHistory,
    /// Result of the refusal gates, derived at construction
    pub should_refuse: bool,
}

/// The fixed policy for merging evidence from multiple sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisStrategy {
    /// Source classes in priority order
    pub prioritize: Vec<String>,
    pub skip_redundant: bool,
    pub emphasize_recent: bool,
    pub highlight_contradictions: bool,
}

impl Default for SynthesisStrategy {
    fn default() -> Self {
        Self {
            prioritize: vec![
                "user_artifacts".to_string(),
                "courses".to_string(),
                "web".to_string(),
            ],
            skip_redundant: true,
            emphasize_recent: true,
            highlight_contradictions: true,
        }
    }
}

/// Reasoning notes produced by the thinker for downstream grounding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Synthesis {
    /// How well the evidence supports a response, 0.0 - 1.0
    pub grounding_confidence: f32,
    pub source_count: usize,
    pub contradictions: Vec<String>,
    pub strategy: SynthesisStrategy,
    pub suggested_tools: Vec<String>,
    /// Entity/relationship stubs extracted from the evidence
    pub knowledge_graph_nodes: Vec<serde_json::Value>,
}

/// Overall outcome of one pipeline execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStatus {
    Success,
    Gated,
    Error,
}

/// What the caller should do with the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NextAction {
    Respond,
    Ask,
    Refuse,
}

/// Terminal, immutable result of one pipeline execution.
///
/// Returned to the caller and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub status: PipelineStatus,
    pub query: String,
    pub sources_found: usize,
    pub documents_retrieved: usize,
    pub courses_retrieved: usize,
    pub is_grounded: bool,
    pub grounding_confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guided_question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthesis_strategy: Option<SynthesisStrategy>,
    #[serde(default)]
    pub contradictions: Vec<String>,
    pub next_action: NextAction,
}

impl PipelineOutput {
    /// Output for the empty-discovery short-circuit: a valid outcome,
    /// not a caller-visible failure.
    pub fn no_sources(query: impl Into<String>) -> Self {
        Self {
            status: PipelineStatus::Error,
            query: query.into(),
            sources_found: 0,
            documents_retrieved: 0,
            courses_retrieved: 0,
            is_grounded: false,
            grounding_confidence: 0.0,
            guided_question: Some("No sources found. Please refine your query.".to_string()),
            synthesis_strategy: None,
            contradictions: Vec::new(),
            next_action: NextAction::Ask,
        }
    }

    /// Output for a refusal-gated execution: uncertain but not zero.
    pub fn gated(
        query: impl Into<String>,
        sources_found: usize,
        buckets: &RetrievalBuckets,
        guided_question: String,
    ) -> Self {
        Self {
            status: PipelineStatus::Gated,
            query: query.into(),
            sources_found,
            documents_retrieved: buckets.documents.len(),
            courses_retrieved: buckets.courses.len(),
            is_grounded: false,
            grounding_confidence: super::thinker::GATED_CONFIDENCE,
            guided_question: Some(guided_question),
            synthesis_strategy: None,
            contradictions: Vec::new(),
            next_action: NextAction::Ask,
        }
    }

    /// Output for an unhandled failure inside the pipeline.
    pub fn failed(query: impl Into<String>) -> Self {
        Self {
            status: PipelineStatus::Error,
            query: query.into(),
            sources_found: 0,
            documents_retrieved: 0,
            courses_retrieved: 0,
            is_grounded: false,
            grounding_confidence: 0.0,
            guided_question: None,
            synthesis_strategy: None,
            contradictions: Vec::new(),
            next_action: NextAction::Refuse,
        }
    }
}

/// What kind of session chunk is being archived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    Problem,
    Solution,
    Principle,
}

/// One retrievable chunk of a completed session, tagged for future
/// `similar_past_problems` lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionChunk {
    pub kind: ChunkKind,
    pub content: String,
    pub session_id: String,
    pub domain: String,
}
