//! Workflow modules grouped by learner-facing concern.

pub mod placement;
pub mod progression;
