use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use super::certification::{CertificationGate, ExamDecision, ExamEligibility};
use super::domain::{
    parse_stored_level, promotion_domain, ExamOutcome, LearnerId, LevelChange, LevelChangeResult,
    DEFAULT_LEVEL, ROLLING_WINDOW_SIZE,
};
use super::evaluation::{last_n, rolling_average, PromotionConfig, PromotionEngine};
use super::repository::{LevelStore, ScoreLedger, StoreError};

/// Moves learner levels in response to recorded sessions and exams.
pub struct ProgressionService<L, S> {
    levels: Arc<L>,
    ledger: Arc<S>,
    engine: PromotionEngine,
    gate: CertificationGate,
}

impl<L, S> ProgressionService<L, S>
where
    L: LevelStore,
    S: ScoreLedger,
{
    pub fn new(levels: Arc<L>, ledger: Arc<S>, config: PromotionConfig) -> Self {
        Self {
            levels,
            ledger,
            engine: PromotionEngine::new(config.clone()),
            gate: CertificationGate::new(config),
        }
    }

    pub fn config(&self) -> &PromotionConfig {
        self.engine.config()
    }

    /// Level the learner currently holds, after stored-form interpretation.
    pub fn current_level(&self, learner: &LearnerId) -> Result<u8, ProgressionServiceError> {
        let stored = self.levels.level(learner)?;
        Ok(stored
            .map(|raw| parse_stored_level(&raw))
            .unwrap_or(DEFAULT_LEVEL))
    }

    /// Appends one session score, re-evaluates and persists any level move.
    pub fn record_attempt(
        &self,
        learner: &LearnerId,
        score: f64,
    ) -> Result<LevelChangeResult, ProgressionServiceError> {
        self.ledger.append(learner, score)?;
        let history = self.ledger.scores(learner)?;
        let current = promotion_domain(self.current_level(learner)?);
        let result = self.engine.evaluate(current, &history);
        if result.change != LevelChange::Same {
            self.levels.set_level(learner, result.new_level)?;
        }
        Ok(result)
    }

    pub fn exam_eligibility(
        &self,
        learner: &LearnerId,
    ) -> Result<ExamEligibility, ProgressionServiceError> {
        let level = self.current_level(learner)?;
        let history = self.ledger.scores(learner)?;
        let window = last_n(&history, ROLLING_WINDOW_SIZE);
        Ok(ExamEligibility {
            eligible: self.gate.exam_eligibility(level, &history),
            current_level: level,
            recorded_scores: history.len(),
            rolling_average: rolling_average(window),
        })
    }

    /// Grades an exam attempt and applies the decision.
    ///
    /// Eligibility is not re-checked here; callers decide when an attempt
    /// may be submitted. A failed attempt leaves the stored level alone
    /// and reports when a retry opens.
    pub fn submit_exam(
        &self,
        learner: &LearnerId,
        outcome: &ExamOutcome,
        taken_on: NaiveDate,
    ) -> Result<ExamDecision, ProgressionServiceError> {
        let result = self.gate.process_exam(outcome);
        if result.certified {
            self.levels.set_level(learner, result.new_level)?;
        }
        let retry_available_on = if result.certified {
            None
        } else {
            Some(self.gate.retry_available_on(taken_on))
        };
        Ok(ExamDecision {
            result,
            retry_available_on,
        })
    }
}

#[derive(Debug, Error)]
pub enum ProgressionServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
