//! Listening and speaking micro-tasks that confirm or soften the lexical band.

use serde::{Deserialize, Serialize};

use super::content::{ListeningItem, SpeakingItem};
use super::domain::Band;

/// Speech recording backend used by the speaking task.
///
/// `available` reports whether a recording can be attempted at all;
/// `capture` runs one attempt against the scripted sentence.
pub trait SpeechCapture: Send + Sync {
    fn available(&self) -> bool;
    fn capture(&self, sentence: &str) -> bool;
}

/// What happened during the speaking task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionResult {
    pub done: bool,
    pub capture_available: bool,
}

impl ProductionResult {
    /// Whether the task counts as completed for scoring.
    ///
    /// A learner is never penalized for a backend that could not record.
    pub const fn effective_done(self) -> bool {
        self.done || !self.capture_available
    }
}

/// Runs the speaking task against the given backend.
pub fn attempt_production(capture: &dyn SpeechCapture, item: &SpeakingItem) -> ProductionResult {
    if !capture.available() {
        return ProductionResult {
            done: true,
            capture_available: false,
        };
    }
    ProductionResult {
        done: capture.capture(item.sentence),
        capture_available: true,
    }
}

/// Checks a word-ordering answer against the expected sentence.
///
/// Every token must match in position; a partial answer never passes.
pub fn listening_answer_matches(item: &ListeningItem, answer: &[String]) -> bool {
    answer.len() == item.tokens.len()
        && item
            .tokens
            .iter()
            .zip(answer.iter())
            .all(|(expected, given)| *expected == given.as_str())
}

/// Softens the band by one step when either task was missed.
pub fn apply_task_results(band: Band, listening_correct: bool, speaking_done: bool) -> Band {
    if listening_correct && speaking_done {
        band
    } else {
        band.step_down()
    }
}
