use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;

use super::content::AssessmentContent;
use super::domain::{Band, CefrTier};
use super::service::{PlacementService, PlacementServiceError, PlacementSubmission};
use crate::workflows::progression::LevelStore;

/// Router builder exposing HTTP endpoints for interview content and scoring.
pub fn placement_router<C, L>(service: Arc<PlacementService<C, L>>) -> Router
where
    C: AssessmentContent + 'static,
    L: LevelStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/placement/content",
            get(content_handler::<C, L>),
        )
        .route(
            "/api/v1/placement/result",
            post(submit_handler::<C, L>),
        )
        .with_state(service)
}

#[derive(Debug, Serialize)]
pub(crate) struct ContentView {
    pub(crate) statements: Vec<StatementView>,
    pub(crate) vocabulary: VocabularyView,
    pub(crate) listening: Vec<ListeningView>,
    pub(crate) speaking: Vec<SpeakingView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatementView {
    pub(crate) key: &'static str,
    pub(crate) text: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct VocabularyView {
    pub(crate) tier_a: Vec<&'static str>,
    pub(crate) tier_b: Vec<&'static str>,
    pub(crate) tier_c: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ListeningView {
    pub(crate) band: &'static str,
    pub(crate) sentence: &'static str,
    pub(crate) tokens: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SpeakingView {
    pub(crate) band: &'static str,
    pub(crate) sentence: &'static str,
}

pub(crate) async fn content_handler<C, L>(
    State(service): State<Arc<PlacementService<C, L>>>,
) -> axum::Json<ContentView>
where
    C: AssessmentContent + 'static,
    L: LevelStore + 'static,
{
    let content = service.content();
    let statements = content
        .statements()
        .iter()
        .map(|statement| StatementView {
            key: statement.key,
            text: statement.text,
        })
        .collect();
    let vocabulary = VocabularyView {
        tier_a: content.vocabulary(CefrTier::A).to_vec(),
        tier_b: content.vocabulary(CefrTier::B).to_vec(),
        tier_c: content.vocabulary(CefrTier::C).to_vec(),
    };
    let mut listening = Vec::new();
    let mut speaking = Vec::new();
    for band in Band::ordered() {
        let item = content.listening_item(band);
        listening.push(ListeningView {
            band: band.label(),
            sentence: item.sentence,
            tokens: item.tokens.clone(),
        });
        speaking.push(SpeakingView {
            band: band.label(),
            sentence: content.speaking_item(band).sentence,
        });
    }

    axum::Json(ContentView {
        statements,
        vocabulary,
        listening,
        speaking,
    })
}

pub(crate) async fn submit_handler<C, L>(
    State(service): State<Arc<PlacementService<C, L>>>,
    axum::Json(submission): axum::Json<PlacementSubmission>,
) -> Response
where
    C: AssessmentContent + 'static,
    L: LevelStore + 'static,
{
    match service.place(&submission) {
        Ok(outcome) => {
            let view = outcome.view(&submission.learner_id);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(PlacementServiceError::Interview(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(PlacementServiceError::Store(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
