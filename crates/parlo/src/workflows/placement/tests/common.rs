use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::placement::content::{AssessmentContent, StandardContent};
use crate::workflows::placement::domain::{
    Band, LexicalSelection, OccupationProfile, SelfReportTier, StatementAnswer,
};
use crate::workflows::placement::interview::{InterviewSession, InterviewStep};
use crate::workflows::placement::tasks::{ProductionResult, SpeechCapture};
use crate::workflows::placement::{placement_router, CefrTier, PlacementService, PlacementSubmission};
use crate::workflows::progression::domain::LearnerId;
use crate::workflows::progression::repository::{LevelStore, StoreError};

pub(super) fn content() -> StandardContent {
    StandardContent::standard()
}

pub(super) fn learner(suffix: &str) -> LearnerId {
    LearnerId(format!("learner-{suffix}"))
}

pub(super) fn intermediate_selection() -> LexicalSelection {
    LexicalSelection {
        tier_a: vec!["book".to_string(), "water".to_string()],
        tier_b: vec!["challenge".to_string()],
        tier_c: Vec::new(),
    }
}

pub(super) fn listening_order(content: &StandardContent, band: Band) -> Vec<String> {
    content
        .listening_item(band)
        .tokens
        .iter()
        .map(|token| token.to_string())
        .collect()
}

/// A complete, well-formed submission that should land on level 4.
pub(super) fn submission() -> PlacementSubmission {
    let content = content();
    PlacementSubmission {
        learner_id: learner("intake"),
        statements: vec![StatementAnswer::Partially; content.statements().len()],
        lexical: intermediate_selection(),
        self_report: "smalltalk".to_string(),
        listening_order: listening_order(&content, Band::Intermediate),
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

pub(super) fn placement_router_with_service(
    service: PlacementService<StandardContent, MemoryLevelStore>,
) -> axum::Router {
    placement_router(Arc::new(service))
}

/// Answers every step up to the results screen.
pub(super) fn complete_interview(session: &mut InterviewSession, capture: &ScriptedCapture) {
    loop {
        match session.current() {
            InterviewStep::Language => session.record_native_language("Korean".to_string()),
            InterviewStep::PracticeReason => {
                session.record_practice_reason("work calls".to_string())
            }
            InterviewStep::Occupation => session.record_occupation(OccupationProfile {
                field: "software".to_string(),
                role: "backend engineer".to_string(),
            }),
            InterviewStep::SelfAssessment => session.record_self_report(SelfReportTier::Smalltalk),
            InterviewStep::Statement(index) => session
                .record_statement(index, StatementAnswer::Partially)
                .expect("statement exists"),
            InterviewStep::Lexical(tier) => {
                if tier == CefrTier::B {
                    session.record_lexical(tier, vec!["challenge".to_string()]);
                }
            }
            InterviewStep::DailyGoal => session.record_daily_goal(15),
            InterviewStep::Notifications => session.record_notifications(true),
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
            InterviewStep::Results => break,
        }
        session.advance().expect("step answered");
    }
}

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
    pub(super) levels: Arc<Mutex<HashMap<LearnerId, String>>>,
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

pub(super) struct UnavailableLevelStore;

impl LevelStore for UnavailableLevelStore {
    fn level(&self, _learner: &LearnerId) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("level store offline".to_string()))
    }

    fn set_level(&self, _learner: &LearnerId, _level: u8) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("level store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
