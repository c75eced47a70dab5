use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{ExamOutcome, LearnerId};
use super::repository::{LevelStore, ScoreLedger};
use super::service::ProgressionService;

/// Router builder exposing HTTP endpoints for session scores and the exam.
pub fn progression_router<L, S>(service: Arc<ProgressionService<L, S>>) -> Router
where
    L: LevelStore + 'static,
    S: ScoreLedger + 'static,
{
    Router::new()
        .route(
            "/api/v1/progress/attempts",
            post(attempt_handler::<L, S>),
        )
        .route(
            "/api/v1/progress/:learner_id/level",
            get(level_handler::<L, S>),
        )
        .route(
            "/api/v1/progress/:learner_id/certification",
            get(eligibility_handler::<L, S>).post(exam_handler::<L, S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct AttemptRequest {
    pub(crate) learner_id: LearnerId,
    pub(crate) score: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct LevelChangeView {
    pub(crate) learner_id: String,
    pub(crate) new_level: u8,
    pub(crate) change: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct LevelView {
    pub(crate) learner_id: String,
    pub(crate) level: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExamRequest {
    pub(crate) passed: bool,
    #[serde(default)]
    pub(crate) overall_score: Option<f64>,
    #[serde(default)]
    pub(crate) sub_scores: Option<Vec<f64>>,
    #[serde(default)]
    pub(crate) taken_on: Option<NaiveDate>,
}

pub(crate) async fn attempt_handler<L, S>(
    State(service): State<Arc<ProgressionService<L, S>>>,
    axum::Json(request): axum::Json<AttemptRequest>,
) -> Response
where
    L: LevelStore + 'static,
    S: ScoreLedger + 'static,
{
    match service.record_attempt(&request.learner_id, request.score) {
        Ok(result) => {
            let view = LevelChangeView {
                learner_id: request.learner_id.0.clone(),
                new_level: result.new_level,
                change: result.change.label(),
            };
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn level_handler<L, S>(
    State(service): State<Arc<ProgressionService<L, S>>>,
    Path(learner_id): Path<String>,
) -> Response
where
    L: LevelStore + 'static,
    S: ScoreLedger + 'static,
{
    let learner = LearnerId(learner_id);
    match service.current_level(&learner) {
        Ok(level) => {
            let view = LevelView {
                learner_id: learner.0,
                level,
            };
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn eligibility_handler<L, S>(
    State(service): State<Arc<ProgressionService<L, S>>>,
    Path(learner_id): Path<String>,
) -> Response
where
    L: LevelStore + 'static,
    S: ScoreLedger + 'static,
{
    let learner = LearnerId(learner_id);
    match service.exam_eligibility(&learner) {
        Ok(eligibility) => (StatusCode::OK, axum::Json(eligibility)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn exam_handler<L, S>(
    State(service): State<Arc<ProgressionService<L, S>>>,
    Path(learner_id): Path<String>,
    axum::Json(request): axum::Json<ExamRequest>,
) -> Response
where
    L: LevelStore + 'static,
    S: ScoreLedger + 'static,
{
    let learner = LearnerId(learner_id);
    let outcome = ExamOutcome {
        passed: request.passed,
        overall_score: request.overall_score,
        sub_scores: request.sub_scores,
    };
    let taken_on = request
        .taken_on
        .unwrap_or_else(|| Local::now().date_naive());
    match service.submit_exam(&learner, &outcome, taken_on) {
        Ok(decision) => (StatusCode::OK, axum::Json(decision)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
