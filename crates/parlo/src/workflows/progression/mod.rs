//! Level progression workflow.
//!
//! Tracks per-session scores, promotes and demotes levels over a rolling
//! window, and gates entry to the certification exam that grants the top
//! level.

pub mod domain;
pub mod evaluation;
pub mod repository;
pub mod router;
pub mod service;

mod certification;
mod import;

#[cfg(test)]
mod tests;

pub use certification::{
    CertificationGate, ExamDecision, ExamEligibility, CERTIFIED_LEVEL, PRO_ENTRY_LEVEL,
};
pub use domain::{
    parse_stored_level, promotion_domain, ExamOutcome, LearnerId, LevelChange, LevelChangeResult,
    ProExamResult, DEFAULT_LEVEL, LEVEL_MAX, LEVEL_MIN, PLACEMENT_LEVEL_MIN, ROLLING_WINDOW_SIZE,
};
pub use evaluation::{last_n, rolling_average, PromotionConfig, PromotionEngine};
pub use import::{ImportSummary, ScoreHistoryImporter, ScoreImportError};
pub use repository::{LevelStore, ScoreLedger, StoreError};
pub use router::progression_router;
pub use service::{ProgressionService, ProgressionServiceError};
