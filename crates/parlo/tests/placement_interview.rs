//! Integration specifications for the placement interview workflow.
//!
//! Scenarios run the interview end to end through the public session, service
//! and router surfaces, checking that answers collected on the way in resolve
//! to the starting level a learner would actually receive.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use parlo::workflows::placement::{
        AssessmentContent, Band, LexicalSelection, PlacementService, PlacementSubmission,
        ProductionResult, SpeechCapture, StandardContent, StatementAnswer,
    };
    use parlo::workflows::progression::repository::{LevelStore, StoreError};
    use parlo::workflows::progression::LearnerId;

    pub(super) struct ScriptedCapture {
        pub(super) available: bool,
        pub(super) completes: bool,
    }

    impl SpeechCapture for ScriptedCapture {
        fn available(&self) -> bool {
            self.available
        }

        fn capture(&self, _sentence: &str) -> bool {
            self.completes
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryLevelStore {
        levels: Arc<Mutex<HashMap<LearnerId, String>>>,
    }

    impl MemoryLevelStore {
        pub(super) fn stored(&self, learner: &LearnerId) -> Option<String> {
            self.levels
                .lock()
                .expect("level store mutex poisoned")
                .get(learner)
                .cloned()
        }
    }

    impl LevelStore for MemoryLevelStore {
        fn level(&self, learner: &LearnerId) -> Result<Option<String>, StoreError> {
            let guard = self.levels.lock().expect("level store mutex poisoned");
            Ok(guard.get(learner).cloned())
        }

        fn set_level(&self, learner: &LearnerId, level: u8) -> Result<(), StoreError> {
            let mut guard = self.levels.lock().expect("level store mutex poisoned");
            guard.insert(learner.clone(), level.to_string());
            Ok(())
        }
    }

    pub(super) fn submission() -> PlacementSubmission {
        let content = StandardContent::standard();
        PlacementSubmission {
            learner_id: LearnerId("learner-e2e".to_string()),
            statements: vec![StatementAnswer::Partially; content.statements().len()],
            lexical: LexicalSelection {
                tier_a: Vec::new(),
                tier_b: vec!["challenge".to_string()],
                tier_c: Vec::new(),
            },
            self_report: "smalltalk".to_string(),
            listening_order: content
                .listening_item(Band::Intermediate)
                .tokens
                .iter()
                .map(|token| token.to_string())
                .collect(),
            speaking: ProductionResult {
                done: true,
                capture_available: true,
            },
        }
    }

    pub(super) fn build_service() -> (
        PlacementService<StandardContent, MemoryLevelStore>,
        Arc<MemoryLevelStore>,
    ) {
        let levels = Arc::new(MemoryLevelStore::default());
        let service = PlacementService::new(Arc::new(StandardContent::standard()), levels.clone());
        (service, levels)
    }

    pub(super) use MemoryLevelStore as Levels;
}

mod interview {
    use super::common::*;
    use parlo::workflows::placement::{
        Band, CefrTier, InterviewSession, InterviewStep, OccupationProfile, SelfReportTier,
        StandardContent, StatementAnswer,
    };

    fn answer_current(session: &mut InterviewSession, capture: &ScriptedCapture) {
        match session.current() {
            InterviewStep::Language => session.record_native_language("Japanese".to_string()),
            InterviewStep::PracticeReason => {
                session.record_practice_reason("overseas clients".to_string())
            }
            InterviewStep::Occupation => session.record_occupation(OccupationProfile {
                field: "design".to_string(),
                role: "product designer".to_string(),
            }),
            InterviewStep::SelfAssessment => session.record_self_report(SelfReportTier::Meeting),
            InterviewStep::Statement(index) => session
                .record_statement(index, StatementAnswer::Yes)
                .expect("statement exists"),
            InterviewStep::Lexical(tier) => {
                if tier == CefrTier::C {
                    session.record_lexical(tier, vec!["articulate".to_string()]);
                }
            }
            InterviewStep::DailyGoal => session.record_daily_goal(20),
            InterviewStep::Notifications => session.record_notifications(false),
            InterviewStep::Listening(_) => {
                let answer = session
                    .listening_item()
                    .tokens
                    .iter()
                    .map(|token| token.to_string())
                    .collect();
                session.record_listening_answer(answer);
            }
            InterviewStep::Speaking(_) => {
                session.record_speaking(capture);
            }
            InterviewStep::Results => {}
        }
    }

    #[test]
    fn guided_session_resolves_an_advanced_level() {
        let content = StandardContent::standard();
        let mut session = InterviewSession::new(&content);
        let capture = ScriptedCapture {
            available: true,
            completes: true,
        };

        while session.current() != InterviewStep::Results {
            answer_current(&mut session, &capture);
            session.advance().expect("answered step advances");
        }

        let outcome = session.outcome().expect("interview complete");
        assert_eq!(outcome.lexical_band, Band::Advanced);
        assert_eq!(outcome.final_band, Band::Advanced);
        assert_eq!(outcome.level, 7);
    }

    #[test]
    fn missed_tasks_soften_the_resolved_level() {
        let content = StandardContent::standard();
        let mut session = InterviewSession::new(&content);
        let capture = ScriptedCapture {
            available: true,
            completes: false,
        };

        while session.current() != InterviewStep::Results {
            answer_current(&mut session, &capture);
            session.advance().expect("answered step advances");
        }

        let outcome = session.outcome().expect("interview complete");
        assert_eq!(outcome.lexical_band, Band::Advanced);
        assert_eq!(outcome.final_band, Band::Intermediate);
        assert!(!outcome.speaking_done);
        assert_eq!(outcome.level, 4);
    }

    #[test]
    fn rebanding_keeps_the_interview_length_stable() {
        let content = StandardContent::standard();
        let mut session = InterviewSession::new(&content);
        let length = session.plan().len();

        session.record_lexical(CefrTier::B, vec!["deadline".to_string()]);
        session.record_lexical(CefrTier::C, vec!["scope".to_string()]);
        session.record_lexical(CefrTier::C, Vec::new());

        assert_eq!(session.plan().len(), length);
        assert!(session
            .plan()
            .contains(&InterviewStep::Listening(Band::Intermediate)));
    }
}

mod scoring {
    use super::common::*;
    use parlo::workflows::placement::{Band, PlacementError, PlacementServiceError};

    #[test]
    fn submission_is_scored_and_the_level_persisted() {
        let (service, levels) = build_service();
        let submission = submission();

        let outcome = service.place(&submission).expect("submission scores");

        assert_eq!(outcome.final_band, Band::Intermediate);
        assert_eq!(outcome.level, 4);
        assert_eq!(levels.stored(&submission.learner_id), Some("4".to_string()));
    }

    #[test]
    fn statement_count_must_match_the_catalog() {
        let (service, levels) = build_service();
        let mut submission = submission();
        submission.statements.clear();

        match service.place(&submission) {
            Err(PlacementServiceError::Interview(PlacementError::StatementsIncomplete {
                expected,
                received,
            })) => {
                assert_eq!(expected, 6);
                assert_eq!(received, 0);
            }
            other => panic!("expected incomplete statements, got {other:?}"),
        }
        assert_eq!(levels.stored(&submission.learner_id), None);
    }

    #[test]
    fn double_miss_cannot_fall_below_the_bottom_band() {
        let (service, _) = build_service();
        let mut submission = submission();
        submission.lexical.tier_b.clear();
        submission.listening_order.clear();
        submission.speaking.done = false;

        let outcome = service.place(&submission).expect("submission scores");

        assert_eq!(outcome.lexical_band, Band::Beginner);
        assert_eq!(outcome.final_band, Band::Beginner);
        assert_eq!(outcome.level, 1);
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    use parlo::workflows::placement::{placement_router, PlacementService, StandardContent};

    fn build_router() -> axum::Router {
        let levels = Arc::new(Levels::default());
        let service = Arc::new(PlacementService::new(
            Arc::new(StandardContent::standard()),
            levels,
        ));
        placement_router(service)
    }

    #[tokio::test]
    async fn content_endpoint_serves_the_interview_catalog() {
        let router = build_router();

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/placement/content")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(
            payload
                .get("statements")
                .and_then(Value::as_array)
                .map(Vec::len),
            Some(6)
        );
        assert_eq!(
            payload
                .pointer("/vocabulary/tier_c")
                .and_then(Value::as_array)
                .map(Vec::len),
            Some(18)
        );
        assert_eq!(
            payload.pointer("/speaking/0/band").and_then(Value::as_str),
            Some("beginner")
        );
    }

    #[tokio::test]
    async fn result_endpoint_returns_the_resolved_placement() {
        let router = build_router();
        let submission = submission();

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/placement/result")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&submission).expect("serialize submission"),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload.get("level").and_then(Value::as_u64), Some(4));
        assert_eq!(
            payload.get("lexical_band").and_then(Value::as_str),
            Some("intermediate")
        );
        assert_eq!(
            payload.get("listening_correct").and_then(Value::as_bool),
            Some(true)
        );
    }

    #[tokio::test]
    async fn malformed_submissions_are_rejected_with_details() {
        let router = build_router();
        let mut submission = submission();
        submission.statements.truncate(1);

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/placement/result")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&submission).expect("serialize submission"),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert!(payload
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .contains("expected 6"));
    }
}
