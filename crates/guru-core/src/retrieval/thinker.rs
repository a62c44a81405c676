//! Thinker agent: synthesis and reasoning.
//!
//! Fourth pipeline stage. Consolidates retrieved content and grounding
//! context into a confidence score, a synthesis strategy and reasoning
//! notes for the downstream model.

use super::model::{GroundingContext, RetrievalBuckets, Synthesis, SynthesisStrategy};

/// Confidence floor before any evidence is counted.
pub const BASE_CONFIDENCE: f32 = 0.5;
/// Confidence added per retrieved item.
pub const SOURCE_WEIGHT: f32 = 0.1;
/// Confidence added when the user's profile is known.
pub const PROFILE_BOOST: f32 = 0.1;
/// Confidence subtracted per detected contradiction.
pub const CONTRADICTION_PENALTY: f32 = 0.05;
/// Confidence above which an output counts as grounded.
pub const GROUNDED_THRESHOLD: f32 = 0.6;
/// Fixed confidence reported for gated outputs: uncertain, not zero.
pub const GATED_CONFIDENCE: f32 = 0.3;

/// Synthesizes retrieved content into a confidence score and strategy.
#[derive(Default)]
pub struct ThinkerAgent;

impl ThinkerAgent {
    pub fn new() -> Self {
        Self
    }

    /// Produces the thinker notes for one pipeline execution.
    pub async fn synthesize(
        &self,
        retrieval: &RetrievalBuckets,
        grounding: &GroundingContext,
        query: &str,
    ) -> Synthesis {
        tracing::info!("thinker: synthesizing response");

        let contradictions = self.detect_contradictions(retrieval);
        let grounding_confidence = Self::calculate_confidence(
            retrieval.total(),
            grounding.profile.is_some(),
            contradictions.len(),
        );

        tracing::info!(confidence = grounding_confidence, "thinker: synthesis complete");

        Synthesis {
            grounding_confidence,
            source_count: retrieval.total(),
            contradictions,
            strategy: SynthesisStrategy::default(),
            suggested_tools: self.suggest_tools(query),
            knowledge_graph_nodes: self.build_knowledge_graph(retrieval),
        }
    }

    /// The grounding-confidence formula:
    /// `clamp(min(0.5 + 0.1 * sources, 1.0) + profile_boost - 0.05 * contradictions, 0, 1)`.
    pub fn calculate_confidence(
        total_sources: usize,
        has_profile: bool,
        contradiction_count: usize,
    ) -> f32 {
        let mut confidence =
            (BASE_CONFIDENCE + total_sources as f32 * SOURCE_WEIGHT).min(1.0);
        if has_profile {
            confidence += PROFILE_BOOST;
        }
        confidence -= contradiction_count as f32 * CONTRADICTION_PENALTY;
        confidence.clamp(0.0, 1.0)
    }

    /// Finds conflicting information across sources.
    ///
    /// TODO: compare document claims pairwise; until then no
    /// contradictions are reported and the penalty never applies.
    fn detect_contradictions(&self, _retrieval: &RetrievalBuckets) -> Vec<String> {
        Vec::new()
    }

    /// Suggests tools the user might reach for next.
    fn suggest_tools(&self, _query: &str) -> Vec<String> {
        vec![
            "terminal".to_string(),
            "debugger".to_string(),
            "documentation".to_string(),
        ]
    }

    /// Extracts entity/relationship stubs from the retrieved content.
    fn build_knowledge_graph(&self, _retrieval: &RetrievalBuckets) -> Vec<serde_json::Value> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieval::model::{ContentKind, InquiryHistory, RetrievalResult, UserProfile};
    use std::collections::HashMap;

    fn buckets_with(count: usize) -> RetrievalBuckets {
        let mut buckets = RetrievalBuckets::default();
        for i in 0..count {
            buckets.push(RetrievalResult {
                source_id: format!("src-{i}"),
                content: "content".to_string(),
                content_type: ContentKind::Document,
                relevance_score: 0.8,
                metadata: HashMap::new(),
            });
        }
        buckets
    }

    fn grounding(profile: bool) -> GroundingContext {
        GroundingContext {
            profile: profile.then(|| UserProfile {
                learning_style: Some("conceptual".to_string()),
                ..UserProfile::default()
            }),
            recall_patches: vec![],
            past_problems: vec![],
            inquiry: InquiryHistory::default(),
            should_refuse: false,
        }
    }

    #[test]
    fn test_five_sources_no_profile_saturates_at_one() {
        let confidence = ThinkerAgent::calculate_confidence(5, false, 0);
        assert!((confidence - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_two_sources_profile_one_contradiction() {
        let confidence = ThinkerAgent::calculate_confidence(2, true, 1);
        assert!((confidence - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_confidence_is_clamped_for_extreme_inputs() {
        assert!(ThinkerAgent::calculate_confidence(1000, true, 0) <= 1.0);
        assert!(ThinkerAgent::calculate_confidence(0, false, 1000) >= 0.0);
        // Profile boost on an already saturated base still clamps.
        assert!(ThinkerAgent::calculate_confidence(10, true, 0) <= 1.0);
    }

    #[tokio::test]
    async fn test_synthesis_carries_the_fixed_strategy() {
        let thinker = ThinkerAgent::new();
        let synthesis = thinker
            .synthesize(&buckets_with(2), &grounding(true), "how to fix")
            .await;

        assert_eq!(synthesis.source_count, 2);
        assert!(synthesis.contradictions.is_empty());
        assert_eq!(synthesis.strategy, SynthesisStrategy::default());
        assert!((synthesis.grounding_confidence - 0.8).abs() < 1e-6);
        assert!(!synthesis.suggested_tools.is_empty());
    }
}
