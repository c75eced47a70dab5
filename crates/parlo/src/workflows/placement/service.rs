use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::classifier::classify;
use super::content::AssessmentContent;
use super::domain::{
    LexicalSelection, PlacementError, PlacementOutcome, SelfReportTier, StatementAnswer,
};
use super::interview::InterviewSession;
use super::resolver::resolve_level;
use super::tasks::{apply_task_results, listening_answer_matches, ProductionResult};
use crate::workflows::progression::{LearnerId, LevelStore, StoreError};

/// Completed interview answers submitted in one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementSubmission {
    pub learner_id: LearnerId,
    pub statements: Vec<StatementAnswer>,
    pub lexical: LexicalSelection,
    pub self_report: String,
    pub listening_order: Vec<String>,
    pub speaking: ProductionResult,
}

/// Scores placement submissions and persists the starting level.
pub struct PlacementService<C, L> {
    content: Arc<C>,
    levels: Arc<L>,
}

impl<C, L> PlacementService<C, L>
where
    C: AssessmentContent,
    L: LevelStore,
{
    pub fn new(content: Arc<C>, levels: Arc<L>) -> Self {
        Self { content, levels }
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    /// Starts an interactive session over this service's content.
    pub fn start_interview(&self) -> InterviewSession {
        InterviewSession::new(self.content.as_ref())
    }

    /// Scores a submission and stores the resulting level.
    ///
    /// An unrecognized self-report string is not rejected; it resolves to
    /// the middle of the band, the same as historical records that predate
    /// the current tier names.
    pub fn place(
        &self,
        submission: &PlacementSubmission,
    ) -> Result<PlacementOutcome, PlacementServiceError> {
        let expected = self.content.statements().len();
        if submission.statements.len() != expected {
            return Err(PlacementError::StatementsIncomplete {
                expected,
                received: submission.statements.len(),
            }
            .into());
        }

        let tier = SelfReportTier::parse(&submission.self_report);
        let lexical_band = classify(&submission.lexical);
        let listening_correct = listening_answer_matches(
            self.content.listening_item(lexical_band),
            &submission.listening_order,
        );
        let speaking_done = submission.speaking.effective_done();
        let final_band = apply_task_results(lexical_band, listening_correct, speaking_done);
        let level = resolve_level(final_band, tier, None);

        self.levels.set_level(&submission.learner_id, level)?;

        Ok(PlacementOutcome {
            lexical_band,
            final_band,
            level,
            listening_correct,
            speaking_done,
        })
    }
}

#[derive(Debug, Error)]
pub enum PlacementServiceError {
    #[error(transparent)]
    Interview(#[from] PlacementError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
