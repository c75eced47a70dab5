//! CSV import of historical session scores into a ledger.
//!
//! Accepts exports with `User ID`, `Completed At` and `Score` columns.
//! Rows are appended per learner in completion order so the rolling
//! window sees the same recency the source system did.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::domain::LearnerId;
use super::repository::{ScoreLedger, StoreError};

const USER_ID_HEADER: &str = "User ID";
const COMPLETED_AT_HEADER: &str = "Completed At";
const SCORE_HEADER: &str = "Score";

/// Reads score history exports and appends them to a ledger.
pub struct ScoreHistoryImporter;

impl ScoreHistoryImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        ledger: &dyn ScoreLedger,
    ) -> Result<ImportSummary, ScoreImportError> {
        let file = File::open(path)?;
        Self::from_reader(file, ledger)
    }

    /// Imports every usable row from `reader`.
    ///
    /// Rows without a parseable score or without a user id are counted as
    /// skipped. Rows already appended stay appended when a later write
    /// fails.
    pub fn from_reader<R: Read>(
        reader: R,
        ledger: &dyn ScoreLedger,
    ) -> Result<ImportSummary, ScoreImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        for required in [USER_ID_HEADER, COMPLETED_AT_HEADER, SCORE_HEADER] {
            if !headers.iter().any(|header| header == required) {
                return Err(ScoreImportError::MissingHeader(required));
            }
        }

        let mut rows: Vec<(String, Option<NaiveDateTime>, f64)> = Vec::new();
        let mut skipped = 0usize;
        for record in csv_reader.deserialize::<ScoreRow>() {
            let record = record?;
            if record.user_id.is_empty() {
                skipped += 1;
                continue;
            }
            let score = record
                .score
                .as_deref()
                .and_then(|raw| raw.parse::<f64>().ok());
            let score = match score {
                Some(score) => score,
                None => {
                    skipped += 1;
                    continue;
                }
            };
            let completed_at = record.completed_at.as_deref().and_then(parse_datetime);
            rows.push((record.user_id, completed_at, score));
        }

        rows.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

        let imported = rows.len();
        let mut learners = 0usize;
        let mut previous: Option<&str> = None;
        for (user_id, _, score) in &rows {
            if previous != Some(user_id.as_str()) {
                learners += 1;
                previous = Some(user_id.as_str());
            }
            ledger.append(&LearnerId(user_id.clone()), *score)?;
        }

        Ok(ImportSummary {
            imported,
            skipped,
            learners,
        })
    }
}

/// Counts from one import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
    pub learners: usize,
}

#[derive(Debug, Deserialize)]
struct ScoreRow {
    #[serde(rename = "User ID")]
    user_id: String,
    #[serde(
        rename = "Completed At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    completed_at: Option<String>,
    #[serde(rename = "Score", default, deserialize_with = "empty_string_as_none")]
    score: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|value| !value.is_empty()))
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc).naive_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
pub(crate) fn parse_datetime_for_tests(raw: &str) -> Option<NaiveDateTime> {
    parse_datetime(raw)
}

#[derive(Debug)]
pub enum ScoreImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingHeader(&'static str),
    Store(StoreError),
}

impl fmt::Display for ScoreImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreImportError::Io(_) => write!(f, "could not read the score history file"),
            ScoreImportError::Csv(_) => write!(f, "score history file is not valid csv"),
            ScoreImportError::MissingHeader(name) => {
                write!(f, "score history file is missing the `{name}` column")
            }
            ScoreImportError::Store(_) => write!(f, "scores could not be written to the ledger"),
        }
    }
}

impl std::error::Error for ScoreImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoreImportError::Io(source) => Some(source),
            ScoreImportError::Csv(source) => Some(source),
            ScoreImportError::MissingHeader(_) => None,
            ScoreImportError::Store(source) => Some(source),
        }
    }
}

impl From<std::io::Error> for ScoreImportError {
    fn from(source: std::io::Error) -> Self {
        ScoreImportError::Io(source)
    }
}

impl From<csv::Error> for ScoreImportError {
    fn from(source: csv::Error) -> Self {
        ScoreImportError::Csv(source)
    }
}

impl From<StoreError> for ScoreImportError {
    fn from(source: StoreError) -> Self {
        ScoreImportError::Store(source)
    }
}
