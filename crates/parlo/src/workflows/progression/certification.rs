use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::domain::{ExamOutcome, ProExamResult, ROLLING_WINDOW_SIZE};
use super::evaluation::{last_n, rolling_average, PromotionConfig};

/// Level at which the certification exam becomes available.
pub const PRO_ENTRY_LEVEL: u8 = 7;
/// Level a passing exam grants.
pub const CERTIFIED_LEVEL: u8 = 8;

/// Controls entry to and grading of the certification exam.
#[derive(Debug, Clone)]
pub struct CertificationGate {
    config: PromotionConfig,
}

impl CertificationGate {
    pub fn new(config: PromotionConfig) -> Self {
        Self { config }
    }

    /// Whether a learner may sit the exam right now.
    ///
    /// Requires the entry level, a full rolling window of scores and an
    /// average at or above the entry threshold.
    pub fn exam_eligibility(&self, level: u8, history: &[f64]) -> bool {
        if level != PRO_ENTRY_LEVEL {
            return false;
        }
        let window = last_n(history, ROLLING_WINDOW_SIZE);
        if window.len() < ROLLING_WINDOW_SIZE {
            return false;
        }
        rolling_average(window)
            .map(|average| average >= self.config.pro_entry_avg_threshold)
            .unwrap_or(false)
    }

    /// Grades a finished exam attempt.
    ///
    /// The grader's pass verdict is necessary but not sufficient: a
    /// reported overall score below the pass mark fails, as does any
    /// section below the per-section minimum. Absent scores are not
    /// re-checked; the verdict stands on its own then.
    pub fn process_exam(&self, outcome: &ExamOutcome) -> ProExamResult {
        if !outcome.passed {
            return Self::failed();
        }
        if let Some(overall) = outcome.overall_score {
            if overall < self.config.pro_exam_pass_score {
                return Self::failed();
            }
        }
        if let Some(sub_scores) = &outcome.sub_scores {
            if sub_scores
                .iter()
                .any(|score| *score < self.config.pro_exam_min_sub_score)
            {
                return Self::failed();
            }
        }
        ProExamResult {
            new_level: CERTIFIED_LEVEL,
            certified: true,
        }
    }

    /// First day a retry is allowed after an exam failed on `failed_on`.
    pub fn retry_available_on(&self, failed_on: NaiveDate) -> NaiveDate {
        failed_on + Duration::days(i64::from(self.config.pro_retry_cooldown_days))
    }

    const fn failed() -> ProExamResult {
        ProExamResult {
            new_level: PRO_ENTRY_LEVEL,
            certified: false,
        }
    }
}

/// Why the exam is or is not open to a learner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamEligibility {
    pub eligible: bool,
    pub current_level: u8,
    pub recorded_scores: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolling_average: Option<f64>,
}

/// Graded exam attempt plus the retry window on failure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExamDecision {
    pub result: ProExamResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_available_on: Option<NaiveDate>,
}
