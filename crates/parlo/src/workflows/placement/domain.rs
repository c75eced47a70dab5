use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::workflows::progression::LearnerId;

/// Learner response to a self-description statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementAnswer {
    Yes,
    Partially,
    No,
}

impl StatementAnswer {
    pub const fn label(self) -> &'static str {
        match self {
            StatementAnswer::Yes => "yes",
            StatementAnswer::Partially => "partially",
            StatementAnswer::No => "no",
        }
    }
}

/// Difficulty tier a vocabulary word belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CefrTier {
    A,
    B,
    C,
}

impl CefrTier {
    pub const fn ordered() -> [CefrTier; 3] {
        [CefrTier::A, CefrTier::B, CefrTier::C]
    }

    pub const fn label(self) -> &'static str {
        match self {
            CefrTier::A => "A",
            CefrTier::B => "B",
            CefrTier::C => "C",
        }
    }
}

/// Coarse proficiency band derived from the lexical self-assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Beginner,
    Intermediate,
    Advanced,
}

impl Band {
    pub const fn ordered() -> [Band; 3] {
        [Band::Beginner, Band::Intermediate, Band::Advanced]
    }

    pub const fn index(self) -> u8 {
        match self {
            Band::Beginner => 0,
            Band::Intermediate => 1,
            Band::Advanced => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Band::Beginner => "beginner",
            Band::Intermediate => "intermediate",
            Band::Advanced => "advanced",
        }
    }

    pub const fn step_down(self) -> Band {
        match self {
            Band::Beginner | Band::Intermediate => Band::Beginner,
            Band::Advanced => Band::Intermediate,
        }
    }

    pub const fn step_up(self) -> Band {
        match self {
            Band::Beginner => Band::Intermediate,
            Band::Intermediate | Band::Advanced => Band::Advanced,
        }
    }
}

/// How the learner describes their own spoken-English comfort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfReportTier {
    Freeze,
    Basic,
    Smalltalk,
    Meeting,
    Present,
}

impl SelfReportTier {
    pub const fn ordered() -> [SelfReportTier; 5] {
        [
            SelfReportTier::Freeze,
            SelfReportTier::Basic,
            SelfReportTier::Smalltalk,
            SelfReportTier::Meeting,
            SelfReportTier::Present,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            SelfReportTier::Freeze => "freeze",
            SelfReportTier::Basic => "basic",
            SelfReportTier::Smalltalk => "smalltalk",
            SelfReportTier::Meeting => "meeting",
            SelfReportTier::Present => "present",
        }
    }

    /// Offset the tier contributes inside a band when resolving the level.
    pub const fn offset(self) -> u8 {
        match self {
            SelfReportTier::Freeze | SelfReportTier::Basic => 0,
            SelfReportTier::Smalltalk | SelfReportTier::Meeting => 1,
            SelfReportTier::Present => 2,
        }
    }

    pub fn parse(value: &str) -> Option<SelfReportTier> {
        match value.trim().to_ascii_lowercase().as_str() {
            "freeze" => Some(SelfReportTier::Freeze),
            "basic" => Some(SelfReportTier::Basic),
            "smalltalk" => Some(SelfReportTier::Smalltalk),
            "meeting" => Some(SelfReportTier::Meeting),
            "present" => Some(SelfReportTier::Present),
            _ => None,
        }
    }
}

/// Words the learner marked as known, grouped by tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalSelection {
    pub tier_a: Vec<String>,
    pub tier_b: Vec<String>,
    pub tier_c: Vec<String>,
}

impl LexicalSelection {
    pub fn words_for(&self, tier: CefrTier) -> &[String] {
        match tier {
            CefrTier::A => &self.tier_a,
            CefrTier::B => &self.tier_b,
            CefrTier::C => &self.tier_c,
        }
    }

    pub fn set_words(&mut self, tier: CefrTier, words: Vec<String>) {
        match tier {
            CefrTier::A => self.tier_a = words,
            CefrTier::B => self.tier_b = words,
            CefrTier::C => self.tier_c = words,
        }
    }
}

/// Work context collected early in the interview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupationProfile {
    pub field: String,
    pub role: String,
}

/// Result of a completed placement interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacementOutcome {
    pub lexical_band: Band,
    pub final_band: Band,
    pub level: u8,
    pub listening_correct: bool,
    pub speaking_done: bool,
}

impl PlacementOutcome {
    pub fn view(&self, learner: &LearnerId) -> PlacementOutcomeView {
        PlacementOutcomeView {
            learner_id: learner.0.clone(),
            level: self.level,
            lexical_band: self.lexical_band.label(),
            final_band: self.final_band.label(),
            listening_correct: self.listening_correct,
            speaking_done: self.speaking_done,
        }
    }
}

/// Serializable summary of a placement outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementOutcomeView {
    pub learner_id: String,
    pub level: u8,
    pub lexical_band: &'static str,
    pub final_band: &'static str,
    pub listening_correct: bool,
    pub speaking_done: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("step `{0}` requires an answer before advancing")]
    StepBlocked(&'static str),
    #[error("interview already reached the results step")]
    AlreadyComplete,
    #[error("no statement at index {0}")]
    UnknownStatement(usize),
    #[error("expected {expected} statement answers, received {received}")]
    StatementsIncomplete { expected: usize, received: usize },
    #[error("self-assessment tier was not recorded")]
    SelfAssessmentMissing,
}
