//! End-to-end tests over the use case facade: the full mentor loop,
//! the backward loop into the session archive, and the three pipeline
//! outcomes (respond, gated, no sources).

use async_trait::async_trait;
use guru_application::GuruUseCase;
use guru_core::GuruConfig;
use guru_core::diagnostic::{
    BaselineInput, DiagnosticCapability, DiagnosticQuestion, GuidanceStep, PastProblem,
    ProblemFrame,
};
use guru_core::error::Result;
use guru_core::mentor::AnswerNextAction;
use guru_core::retrieval::{NextAction, PipelineStatus, UserProfile};
use guru_core::session::MentorStage;
use guru_infrastructure::{
    ArtifactEntry, CourseEntry, MemorySessionArchive, MemoryUserContext, MemoryVectorStore,
    NoopWebSearch, StaticCourseCatalog,
};
use std::collections::HashMap;
use std::sync::Arc;

struct ScriptedDiagnostic;

#[async_trait]
impl DiagnosticCapability for ScriptedDiagnostic {
    async fn classify(&self, _observation: &str, _domain: &str) -> Result<Option<String>> {
        Ok(None)
    }
    async fn generate_questions(
        &self,
        _observation: Option<&str>,
        _baseline: Option<&BaselineInput>,
        _domain: &str,
        _past_problems: &[PastProblem],
    ) -> Result<Vec<DiagnosticQuestion>> {
        Ok(vec![
            DiagnosticQuestion::new("q1", "Does the engine turn over?"),
            DiagnosticQuestion::new("q2", "Do the dashboard lights come on?"),
            DiagnosticQuestion::new("q3", "When did this start?"),
        ])
    }
    async fn update_diagnosis(
        &self,
        _observation: Option<&str>,
        _baseline: Option<&BaselineInput>,
        _answers: &HashMap<String, String>,
        _domain: &str,
    ) -> Result<()> {
        Ok(())
    }
    async fn frame_problem(
        &self,
        _observation: Option<&str>,
        _baseline: Option<&BaselineInput>,
        _answers: &HashMap<String, String>,
        _domain: &str,
        _past_problems: &[PastProblem],
    ) -> Result<ProblemFrame> {
        Ok(ProblemFrame {
            summary: "No cranking power reaches the starter".to_string(),
            root_cause: "weak battery".to_string(),
            confidence: 0.75,
            caveats: vec![],
        })
    }
    async fn decide_action(
        &self,
        _frame: Option<&ProblemFrame>,
        _baseline: Option<&BaselineInput>,
        _domain: &str,
    ) -> Result<Vec<GuidanceStep>> {
        Ok(vec![GuidanceStep {
            order: 1,
            action: "Measure battery voltage".to_string(),
            reasoning: "Rules out the most common cause first".to_string(),
            expectation: "12.4V or higher at rest".to_string(),
            risk: None,
        }])
    }
    async fn extract_principle(
        &self,
        _guidance: &[GuidanceStep],
        _result: &str,
        _frame: Option<&ProblemFrame>,
        _domain: &str,
    ) -> Result<String> {
        Ok("Check the power source before the consumer.".to_string())
    }
}

async fn seeded_guru() -> GuruUseCase {
    let vector_store = Arc::new(MemoryVectorStore::new());
    vector_store
        .add_artifact(ArtifactEntry {
            user_id: "alice".to_string(),
            url: "file://alice/car-manual.md".to_string(),
            title: "Car maintenance manual".to_string(),
            category: "document".to_string(),
            content: "Battery, starter and alternator troubleshooting for the car.".to_string(),
        })
        .await;
    vector_store
        .add_artifact(ArtifactEntry {
            user_id: "bob".to_string(),
            url: "file://bob/notes.md".to_string(),
            title: "Bob's car notes".to_string(),
            category: "document".to_string(),
            content: "Car starter clicking sounds and what they mean.".to_string(),
        })
        .await;

    let courses = Arc::new(StaticCourseCatalog::new(vec![CourseEntry {
        url: "course://car-electrics".to_string(),
        title: "Car electrics fundamentals".to_string(),
        summary: "Battery, charging and starting systems".to_string(),
        lessons: vec!["Lesson on battery health".to_string()],
    }]));

    let context = Arc::new(MemoryUserContext::new());
    context
        .set_profile(
            "alice",
            UserProfile {
                learning_style: Some("hands_on".to_string()),
                skill_level: Some("beginner".to_string()),
                ..UserProfile::default()
            },
        )
        .await;

    GuruUseCase::new(
        GuruConfig::default(),
        Some(Arc::new(ScriptedDiagnostic)),
        vector_store,
        courses,
        Some(Arc::new(NoopWebSearch)),
        context,
        Some(Arc::new(MemorySessionArchive::new())),
    )
}

#[tokio::test]
async fn test_full_mentor_loop_over_the_facade() {
    let guru = seeded_guru().await;

    let created = guru.create_session("alice", "car_repair").await;
    assert_eq!(created.stage, MentorStage::Observe);

    let observed = guru
        .observe(&created.session_id, "My car won't start this morning")
        .await
        .unwrap();
    assert_eq!(observed.next_stage, MentorStage::Baseline);

    let baselined = guru
        .baseline(
            &created.session_id,
            BaselineInput {
                what_works: Some("lights and radio work".to_string()),
                ..BaselineInput::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(baselined.questions_generated, 3);

    let mut next_action = AnswerNextAction::Ask;
    for question in ["q1", "q2", "q3"] {
        let answered = guru
            .answer_question(&created.session_id, question, "some answer")
            .await
            .unwrap();
        next_action = answered.next_action;
    }
    assert_eq!(next_action, AnswerNextAction::Frame);

    let framed = guru.frame(&created.session_id).await.unwrap();
    assert_eq!(framed.frame.unwrap().root_cause, "weak battery");

    let guided = guru.guide(&created.session_id).await.unwrap();
    assert_eq!(guided.guidance.len(), 1);

    let reflected = guru
        .reflect(&created.session_id, "voltage was 11.2V, replaced the battery")
        .await
        .unwrap();
    assert!(reflected.session_complete);

    let snapshot = guru.get_session(&created.session_id).await.unwrap();
    assert_eq!(snapshot.stage, MentorStage::Reflect);
    assert!(snapshot.reflection.is_some());
}

#[tokio::test]
async fn test_completed_loop_seeds_the_next_session() {
    let guru = seeded_guru().await;

    // First loop runs to completion and is archived.
    let first = guru.create_session("alice", "car_repair").await;
    guru.observe(&first.session_id, "My car won't start").await.unwrap();
    guru.baseline(&first.session_id, BaselineInput::default()).await.unwrap();
    for question in ["q1", "q2", "q3"] {
        guru.answer_question(&first.session_id, question, "answer").await.unwrap();
    }
    guru.frame(&first.session_id).await.unwrap();
    guru.guide(&first.session_id).await.unwrap();
    guru.reflect(&first.session_id, "fixed").await.unwrap();

    // A new session in the same domain sees the archived problem.
    let second = guru.create_session("alice", "car_repair").await;
    let observed = guru
        .observe(&second.session_id, "Car is dead again")
        .await
        .unwrap();
    assert_eq!(observed.similar_past_problems, 1);

    let snapshot = guru.get_session(&second.session_id).await.unwrap();
    assert_eq!(snapshot.past_problems.len(), 1);
    assert_eq!(
        snapshot.past_problems[0].principle.as_deref(),
        Some("Check the power source before the consumer.")
    );

    assert_eq!(guru.list_sessions("alice").await.len(), 2);
    assert!(guru.list_sessions("bob").await.is_empty());
}

#[tokio::test]
async fn test_query_responds_when_grounded() {
    let guru = seeded_guru().await;

    let output = guru
        .query("alice", "car won't start", "car_repair", None)
        .await;

    assert_eq!(output.status, PipelineStatus::Success);
    assert_eq!(output.next_action, NextAction::Respond);
    assert_eq!(output.sources_found, 2);
    assert_eq!(output.documents_retrieved, 1);
    assert_eq!(output.courses_retrieved, 1);
    assert!((output.grounding_confidence - 0.8).abs() < 1e-6);
    assert!(output.is_grounded);
}

#[tokio::test]
async fn test_query_is_gated_for_an_unknown_user() {
    let guru = seeded_guru().await;

    // Bob has artifacts but no profile.
    let output = guru.query("bob", "car starter clicking", "car_repair", None).await;

    assert_eq!(output.status, PipelineStatus::Gated);
    assert_eq!(output.next_action, NextAction::Ask);
    assert!((output.grounding_confidence - 0.3).abs() < f32::EPSILON);
    assert!(output.guided_question.is_some());
}

#[tokio::test]
async fn test_query_with_no_sources_asks_to_refine() {
    let guru = seeded_guru().await;

    let output = guru
        .query("alice", "sourdough hydration", "baking", Some(true))
        .await;

    assert_eq!(output.status, PipelineStatus::Error);
    assert_eq!(output.next_action, NextAction::Ask);
    assert_eq!(output.grounding_confidence, 0.0);
    assert_eq!(output.sources_found, 0);
}

#[tokio::test]
async fn test_unknown_session_id_is_a_not_found_error() {
    let guru = GuruUseCase::local(GuruConfig::default());
    let err = guru.observe("missing", "anything").await.unwrap_err();
    assert!(err.is_not_found());
}
