use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::progression::domain::LearnerId;
use crate::workflows::progression::repository::{LevelStore, ScoreLedger, StoreError};
use crate::workflows::progression::{progression_router, ProgressionService, PromotionConfig};

pub(super) fn learner(suffix: &str) -> LearnerId {
    LearnerId(format!("learner-{suffix}"))
}

pub(super) fn promotion_config() -> PromotionConfig {
    PromotionConfig::default()
}

pub(super) fn build_service() -> (
    ProgressionService<MemoryLevelStore, MemoryScoreLedger>,
    Arc<MemoryLevelStore>,
    Arc<MemoryScoreLedger>,
) {
    let levels = Arc::new(MemoryLevelStore::default());
    let ledger = Arc::new(MemoryScoreLedger::default());
    let service = ProgressionService::new(levels.clone(), ledger.clone(), promotion_config());
    (service, levels, ledger)
}

pub(super) fn progression_router_with_service(
    service: ProgressionService<MemoryLevelStore, MemoryScoreLedger>,
) -> axum::Router {
    progression_router(Arc::new(service))
}

pub(super) fn seed_scores(ledger: &MemoryScoreLedger, learner: &LearnerId, scores: &[f64]) {
    for score in scores {
        ledger.append(learner, *score).expect("append succeeds");
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryLevelStore {
    pub(super) levels: Arc<Mutex<HashMap<LearnerId, String>>>,
}

impl MemoryLevelStore {
    /// Writes a raw stored value, bypassing the numeric setter.
    pub(super) fn seed_raw(&self, learner: &LearnerId, raw: &str) {
        self.levels
            .lock()
            .expect("level store mutex poisoned")
            .insert(learner.clone(), raw.to_string());
    }

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

#[derive(Default, Clone)]
pub(super) struct MemoryScoreLedger {
    pub(super) scores: Arc<Mutex<HashMap<LearnerId, Vec<f64>>>>,
}

impl ScoreLedger for MemoryScoreLedger {
    fn append(&self, learner: &LearnerId, score: f64) -> Result<(), StoreError> {
        self.scores
            .lock()
            .expect("ledger mutex poisoned")
            .entry(learner.clone())
            .or_default()
            .push(score);
        Ok(())
    }

    fn scores(&self, learner: &LearnerId) -> Result<Vec<f64>, StoreError> {
        let guard = self.scores.lock().expect("ledger mutex poisoned");
        Ok(guard.get(learner).cloned().unwrap_or_default())
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

pub(super) struct UnavailableLedger;

impl ScoreLedger for UnavailableLedger {
    fn append(&self, _learner: &LearnerId, _score: f64) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("ledger offline".to_string()))
    }

    fn scores(&self, _learner: &LearnerId) -> Result<Vec<f64>, StoreError> {
        Err(StoreError::Unavailable("ledger offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
