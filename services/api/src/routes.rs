use crate::infra::{default_promotion_config, AppState, InMemoryScoreLedger};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use parlo::error::AppError;
use parlo::workflows::placement::{placement_router, AssessmentContent, PlacementService};
use parlo::workflows::progression::{
    last_n, parse_stored_level, progression_router, promotion_domain, rolling_average,
    CertificationGate, LearnerId, LevelStore, ProgressionService, PromotionEngine,
    ScoreHistoryImporter, ScoreLedger, ROLLING_WINDOW_SIZE,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct ProgressionProjectionRequest {
    pub(crate) learner_id: String,
    pub(crate) stored_level: String,
    #[serde(default)]
    pub(crate) scores: Vec<f64>,
    #[serde(default)]
    pub(crate) scores_csv: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProgressionProjectionResponse {
    pub(crate) learner_id: String,
    pub(crate) current_level: u8,
    pub(crate) data_source: ScoreDataSource,
    pub(crate) recorded_scores: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) rolling_average: Option<f64>,
    pub(crate) projected_level: u8,
    pub(crate) change: &'static str,
    pub(crate) exam_ready: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ScoreDataSource {
    Csv,
    Inline,
}

pub(crate) fn with_workflow_routes<C, L, S>(
    placement: Arc<PlacementService<C, L>>,
    progression: Arc<ProgressionService<L, S>>,
) -> axum::Router
where
    C: AssessmentContent + 'static,
    L: LevelStore + 'static,
    S: ScoreLedger + 'static,
{
    placement_router(placement)
        .merge(progression_router(progression))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/progress/projection",
            axum::routing::post(progression_projection_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn progression_projection_endpoint(
    Json(payload): Json<ProgressionProjectionRequest>,
) -> Result<Json<ProgressionProjectionResponse>, AppError> {
    let ProgressionProjectionRequest {
        learner_id,
        stored_level,
        scores,
        scores_csv,
    } = payload;

    let (scores, data_source) = if let Some(csv) = scores_csv {
        let ledger = InMemoryScoreLedger::default();
        let reader = Cursor::new(csv.into_bytes());
        ScoreHistoryImporter::from_reader(reader, &ledger)?;
        let imported = ledger.recorded(&LearnerId(learner_id.clone()));
        (imported, ScoreDataSource::Csv)
    } else {
        (scores, ScoreDataSource::Inline)
    };

    let current_level = promotion_domain(parse_stored_level(&stored_level));
    let config = default_promotion_config();
    let engine = PromotionEngine::new(config.clone());
    let gate = CertificationGate::new(config);
    let result = engine.evaluate(current_level, &scores);
    let exam_ready = gate.exam_eligibility(current_level, &scores);

    Ok(Json(ProgressionProjectionResponse {
        learner_id,
        current_level,
        data_source,
        recorded_scores: scores.len(),
        rolling_average: rolling_average(last_n(&scores, ROLLING_WINDOW_SIZE)),
        projected_level: result.new_level,
        change: result.change.label(),
        exam_ready,
    }))
}
