//! Placement interview workflow.
//!
//! Collects onboarding answers, derives a coarse band from the vocabulary
//! the learner recognizes, confirms it with listening and speaking
//! micro-tasks and resolves the starting level on the 0..=8 scale.

pub mod content;
pub mod domain;
pub mod router;
pub mod service;

mod classifier;
mod interview;
mod resolver;
mod tasks;

#[cfg(test)]
mod tests;

pub use classifier::classify;
pub use content::{AssessmentContent, StandardContent};
pub use domain::{
    Band, CefrTier, LexicalSelection, OccupationProfile, PlacementError, PlacementOutcome,
    PlacementOutcomeView, SelfReportTier, StatementAnswer,
};
pub use interview::{InterviewSession, InterviewStep};
pub use resolver::resolve_level;
pub use router::placement_router;
pub use service::{PlacementService, PlacementServiceError, PlacementSubmission};
pub use tasks::{
    apply_task_results, attempt_production, listening_answer_matches, ProductionResult,
    SpeechCapture,
};
