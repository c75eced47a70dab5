use thiserror::Error;

use super::domain::LearnerId;

/// Persistence for each learner's current level, stored in string form.
///
/// Implementations return whatever string was last written, including
/// legacy tier names; interpretation is the caller's job.
pub trait LevelStore: Send + Sync {
    fn level(&self, learner: &LearnerId) -> Result<Option<String>, StoreError>;
    fn set_level(&self, learner: &LearnerId, level: u8) -> Result<(), StoreError>;
}

/// Append-only record of per-session scores, oldest first.
pub trait ScoreLedger: Send + Sync {
    fn append(&self, learner: &LearnerId, score: f64) -> Result<(), StoreError>;
    fn scores(&self, learner: &LearnerId) -> Result<Vec<f64>, StoreError>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
