use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use parlo::workflows::progression::{
    LearnerId, LevelStore, PromotionConfig, ScoreLedger, StoreError,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryLevelStore {
    levels: Arc<Mutex<HashMap<LearnerId, String>>>,
}

impl LevelStore for InMemoryLevelStore {
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
pub(crate) struct InMemoryScoreLedger {
    scores: Arc<Mutex<HashMap<LearnerId, Vec<f64>>>>,
}

impl ScoreLedger for InMemoryScoreLedger {
    fn append(&self, learner: &LearnerId, score: f64) -> Result<(), StoreError> {
        let mut guard = self.scores.lock().expect("ledger mutex poisoned");
        guard.entry(learner.clone()).or_default().push(score);
        Ok(())
    }

    fn scores(&self, learner: &LearnerId) -> Result<Vec<f64>, StoreError> {
        let guard = self.scores.lock().expect("ledger mutex poisoned");
        Ok(guard.get(learner).cloned().unwrap_or_default())
    }
}

impl InMemoryScoreLedger {
    pub(crate) fn recorded(&self, learner: &LearnerId) -> Vec<f64> {
        self.scores
            .lock()
            .expect("ledger mutex poisoned")
            .get(learner)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn learners(&self) -> Vec<LearnerId> {
        let guard = self.scores.lock().expect("ledger mutex poisoned");
        let mut learners: Vec<LearnerId> = guard.keys().cloned().collect();
        learners.sort_by(|a, b| a.0.cmp(&b.0));
        learners
    }
}

pub(crate) fn default_promotion_config() -> PromotionConfig {
    PromotionConfig {
        promotion_threshold: 80.0,
        demotion_threshold: 60.0,
        pro_entry_avg_threshold: 85.0,
        pro_exam_pass_score: 85.0,
        pro_exam_min_sub_score: 70.0,
        pro_retry_cooldown_days: 30,
        allow_top_level_auto_demote: false,
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
