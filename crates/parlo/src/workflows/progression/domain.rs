use serde::{Deserialize, Serialize};

/// Opaque learner identifier, as issued by the account system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LearnerId(pub String);

/// Lowest level the promotion engine will demote to.
pub const LEVEL_MIN: u8 = 1;
/// Highest level on the scale.
pub const LEVEL_MAX: u8 = 8;
/// Placement alone may seed level 0; progression never returns there.
pub const PLACEMENT_LEVEL_MIN: u8 = 0;
/// Level assumed for learners with no usable stored record.
pub const DEFAULT_LEVEL: u8 = 4;
/// How many recent session scores the rolling average looks at.
pub const ROLLING_WINDOW_SIZE: usize = 5;

/// Recovers a level from its stored string form.
///
/// Numeric values within the scale are taken as-is. Tier names written by
/// earlier releases map onto the scale they anchored. Anything else,
/// including numbers above the scale, falls back to [`DEFAULT_LEVEL`]
/// rather than failing the caller.
pub fn parse_stored_level(raw: &str) -> u8 {
    let trimmed = raw.trim();
    if let Ok(level) = trimmed.parse::<u8>() {
        if level <= LEVEL_MAX {
            return level;
        }
        return DEFAULT_LEVEL;
    }
    legacy_tier_level(trimmed).unwrap_or(DEFAULT_LEVEL)
}

fn legacy_tier_level(value: &str) -> Option<u8> {
    match value.to_ascii_lowercase().as_str() {
        "freeze" => Some(0),
        "basic" => Some(2),
        "smalltalk" => Some(4),
        "meeting" => Some(6),
        "present" => Some(8),
        _ => None,
    }
}

/// Clamps a stored level into the range the promotion engine works over.
pub fn promotion_domain(level: u8) -> u8 {
    level.max(LEVEL_MIN)
}

/// Direction a level moved after an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelChange {
    Promoted,
    Demoted,
    Same,
}

impl LevelChange {
    pub const fn label(self) -> &'static str {
        match self {
            LevelChange::Promoted => "promoted",
            LevelChange::Demoted => "demoted",
            LevelChange::Same => "same",
        }
    }
}

/// Outcome of one promotion-engine evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelChangeResult {
    pub new_level: u8,
    pub change: LevelChange,
}

/// Raw result of a proficiency exam attempt, as reported by the grader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamOutcome {
    pub passed: bool,
    pub overall_score: Option<f64>,
    pub sub_scores: Option<Vec<f64>>,
}

/// What the certification gate decided for an exam attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProExamResult {
    pub new_level: u8,
    pub certified: bool,
}
