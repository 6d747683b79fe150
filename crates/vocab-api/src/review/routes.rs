use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;
use vocab_db::repositories::card as card_repo;
use vocab_srs::{Card, Quality};

use super::service;
use crate::{ApiState, error::ApiError};

/// Create the review routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/review", get(get_review_queue))
        .route("/review/{card_id}", post(submit_review))
}

#[derive(Debug, Deserialize)]
struct ReviewQueueParams {
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ReviewSubmission {
    quality: Option<i64>,
}

/// Cards to study now: everything due plus all new cards, oldest due first
async fn get_review_queue(
    State(state): State<ApiState>,
    params: Result<Query<ReviewQueueParams>, QueryRejection>,
) -> Result<Json<Vec<Card>>, ApiError> {
    let Query(params) = params?;

    let cards = card_repo::list_cards(&state.pool)
        .await
        .map_err(ApiError::Database)?;

    Ok(Json(vocab_srs::due_queue(&cards, Utc::now(), params.limit)))
}

async fn submit_review(
    State(state): State<ApiState>,
    card_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ReviewSubmission>, JsonRejection>,
) -> Result<Json<Card>, ApiError> {
    let Path(card_id) = card_id?;
    let Json(payload) = payload?;

    let quality = payload
        .quality
        .ok_or_else(|| ApiError::Validation("quality is required".to_string()))?;
    let quality = Quality::new(quality)?;

    let (card, _) = service::submit_review(&state, card_id, quality, Utc::now()).await?;

    Ok(Json(card))
}
