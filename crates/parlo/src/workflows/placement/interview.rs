//! Step-by-step placement interview state machine.
//!
//! The step plan is built eagerly when the session starts and its length
//! never changes afterwards; lexical updates only re-band the listening
//! and speaking slots in place.

use super::classifier::classify;
use super::content::{AssessmentContent, ListeningItem, SpeakingItem};
use super::domain::{
    Band, CefrTier, LexicalSelection, OccupationProfile, PlacementError, PlacementOutcome,
    SelfReportTier, StatementAnswer,
};
use super::resolver::resolve_level;
use super::tasks::{
    apply_task_results, attempt_production, listening_answer_matches, ProductionResult,
    SpeechCapture,
};

/// One screen of the placement interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewStep {
    Language,
    PracticeReason,
    Occupation,
    SelfAssessment,
    Statement(usize),
    Lexical(CefrTier),
    DailyGoal,
    Notifications,
    Listening(Band),
    Speaking(Band),
    Results,
}

impl InterviewStep {
    pub const fn label(self) -> &'static str {
        match self {
            InterviewStep::Language => "native language",
            InterviewStep::PracticeReason => "practice reason",
            InterviewStep::Occupation => "occupation",
            InterviewStep::SelfAssessment => "self-assessment",
            InterviewStep::Statement(_) => "statement",
            InterviewStep::Lexical(_) => "vocabulary",
            InterviewStep::DailyGoal => "daily goal",
            InterviewStep::Notifications => "notifications",
            InterviewStep::Listening(_) => "listening",
            InterviewStep::Speaking(_) => "speaking",
            InterviewStep::Results => "results",
        }
    }
}

/// In-progress interview for a single learner.
#[derive(Debug, Clone)]
pub struct InterviewSession {
    plan: Vec<InterviewStep>,
    cursor: usize,
    listening: Vec<ListeningItem>,
    speaking: Vec<SpeakingItem>,
    native_language: Option<String>,
    practice_reason: Option<String>,
    occupation: Option<OccupationProfile>,
    self_report: Option<SelfReportTier>,
    statements: Vec<Option<StatementAnswer>>,
    lexical: LexicalSelection,
    daily_goal: Option<u16>,
    notifications_enabled: bool,
    listening_answer: Option<Vec<String>>,
    speaking_result: Option<ProductionResult>,
}

impl InterviewSession {
    pub fn new(content: &dyn AssessmentContent) -> Self {
        let statement_count = content.statements().len();
        let listening = Band::ordered()
            .iter()
            .map(|band| content.listening_item(*band).clone())
            .collect();
        let speaking = Band::ordered()
            .iter()
            .map(|band| content.speaking_item(*band).clone())
            .collect();

        Self {
            plan: build_plan(statement_count, Band::Beginner),
            cursor: 0,
            listening,
            speaking,
            native_language: None,
            practice_reason: None,
            occupation: None,
            self_report: None,
            statements: vec![None; statement_count],
            lexical: LexicalSelection::default(),
            daily_goal: None,
            notifications_enabled: false,
            listening_answer: None,
            speaking_result: None,
        }
    }

    pub fn plan(&self) -> &[InterviewStep] {
        &self.plan
    }

    pub fn current(&self) -> InterviewStep {
        self.plan[self.cursor]
    }

    /// Fraction of the interview seen so far, in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        ((self.cursor + 1) as f32 / self.plan.len() as f32).min(1.0)
    }

    /// Moves to the next step once the current step's requirement is met.
    pub fn advance(&mut self) -> Result<InterviewStep, PlacementError> {
        let step = self.current();
        if step == InterviewStep::Results {
            return Err(PlacementError::AlreadyComplete);
        }
        if !self.step_satisfied(step) {
            return Err(PlacementError::StepBlocked(step.label()));
        }
        self.cursor += 1;
        Ok(self.current())
    }

    /// Moves to the previous step; stepping back from the first step stays put.
    pub fn back(&mut self) -> InterviewStep {
        self.cursor = self.cursor.saturating_sub(1);
        self.current()
    }

    pub fn record_native_language(&mut self, language: String) {
        self.native_language = Some(language);
    }

    pub fn record_practice_reason(&mut self, reason: String) {
        self.practice_reason = Some(reason);
    }

    pub fn record_occupation(&mut self, profile: OccupationProfile) {
        self.occupation = Some(profile);
    }

    pub fn record_self_report(&mut self, tier: SelfReportTier) {
        self.self_report = Some(tier);
    }

    pub fn record_statement(
        &mut self,
        index: usize,
        answer: StatementAnswer,
    ) -> Result<(), PlacementError> {
        let slot = self
            .statements
            .get_mut(index)
            .ok_or(PlacementError::UnknownStatement(index))?;
        *slot = Some(answer);
        Ok(())
    }

    /// Stores the known words for one tier and re-bands the task steps.
    pub fn record_lexical(&mut self, tier: CefrTier, words: Vec<String>) {
        self.lexical.set_words(tier, words);
        let band = classify(&self.lexical);
        for step in self.plan.iter_mut() {
            match step {
                InterviewStep::Listening(slot) | InterviewStep::Speaking(slot) => *slot = band,
                _ => {}
            }
        }
    }

    pub fn record_daily_goal(&mut self, minutes: u16) {
        self.daily_goal = Some(minutes);
    }

    pub fn record_notifications(&mut self, enabled: bool) {
        self.notifications_enabled = enabled;
    }

    pub fn record_listening_answer(&mut self, answer: Vec<String>) {
        self.listening_answer = Some(answer);
    }

    /// Runs the speaking task with the given backend and stores the result.
    pub fn record_speaking(&mut self, capture: &dyn SpeechCapture) -> ProductionResult {
        let result = attempt_production(capture, self.speaking_item());
        self.speaking_result = Some(result);
        result
    }

    /// Listening item for the currently classified band.
    pub fn listening_item(&self) -> &ListeningItem {
        let band = classify(&self.lexical);
        &self.listening[band.index() as usize]
    }

    /// Speaking item for the currently classified band.
    pub fn speaking_item(&self) -> &SpeakingItem {
        let band = classify(&self.lexical);
        &self.speaking[band.index() as usize]
    }

    pub fn native_language(&self) -> Option<&str> {
        self.native_language.as_deref()
    }

    pub fn daily_goal(&self) -> Option<u16> {
        self.daily_goal
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    /// Scores the interview.
    ///
    /// An unanswered listening task counts as incorrect and an unrecorded
    /// speaking task counts as not done; both soften the band the same way
    /// an explicit miss would.
    pub fn outcome(&self) -> Result<PlacementOutcome, PlacementError> {
        let answered = self.statements.iter().filter(|slot| slot.is_some()).count();
        if answered != self.statements.len() {
            return Err(PlacementError::StatementsIncomplete {
                expected: self.statements.len(),
                received: answered,
            });
        }
        let tier = self
            .self_report
            .ok_or(PlacementError::SelfAssessmentMissing)?;

        let lexical_band = classify(&self.lexical);
        let listening_correct = self
            .listening_answer
            .as_ref()
            .map(|answer| {
                listening_answer_matches(&self.listening[lexical_band.index() as usize], answer)
            })
            .unwrap_or(false);
        let speaking_done = self
            .speaking_result
            .map(ProductionResult::effective_done)
            .unwrap_or(false);

        let final_band = apply_task_results(lexical_band, listening_correct, speaking_done);
        let level = resolve_level(final_band, Some(tier), None);

        Ok(PlacementOutcome {
            lexical_band,
            final_band,
            level,
            listening_correct,
            speaking_done,
        })
    }

    fn step_satisfied(&self, step: InterviewStep) -> bool {
        match step {
            InterviewStep::PracticeReason => self
                .practice_reason
                .as_ref()
                .map(|reason| !reason.trim().is_empty())
                .unwrap_or(false),
            InterviewStep::Occupation => self
                .occupation
                .as_ref()
                .map(|profile| {
                    !profile.field.trim().is_empty() && !profile.role.trim().is_empty()
                })
                .unwrap_or(false),
            InterviewStep::SelfAssessment => self.self_report.is_some(),
            InterviewStep::Statement(index) => self
                .statements
                .get(index)
                .map(|slot| slot.is_some())
                .unwrap_or(false),
            InterviewStep::DailyGoal => self.daily_goal.is_some(),
            _ => true,
        }
    }
}

fn build_plan(statement_count: usize, band: Band) -> Vec<InterviewStep> {
    let mut plan = Vec::with_capacity(statement_count + 12);
    plan.push(InterviewStep::Language);
    plan.push(InterviewStep::PracticeReason);
    plan.push(InterviewStep::Occupation);
    plan.push(InterviewStep::SelfAssessment);
    for index in 0..statement_count {
        plan.push(InterviewStep::Statement(index));
    }
    for tier in CefrTier::ordered() {
        plan.push(InterviewStep::Lexical(tier));
    }
    plan.push(InterviewStep::DailyGoal);
    plan.push(InterviewStep::Notifications);
    plan.push(InterviewStep::Listening(band));
    plan.push(InterviewStep::Speaking(band));
    plan.push(InterviewStep::Results);
    plan
}
