use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::get,
};
use chrono::Utc;
use serde_json::{Value, json};
use vocab_db::repositories::card as card_repo;
use vocab_srs::Card;

use super::{
    model::{CardDetails, CreateCardRequest, NewCard},
    service,
};
use crate::{ApiState, error::ApiError};

/// Create the card routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/cards", get(list_cards).post(create_card))
        .route("/cards/{card_id}", get(get_card).delete(delete_card))
        .route("/cards/{card_id}/details", get(get_card_details))
}

/// List all cards, newest first
async fn list_cards(State(state): State<ApiState>) -> Result<Json<Vec<Card>>, ApiError> {
    let cards = card_repo::list_cards(&state.pool)
        .await
        .map_err(ApiError::Database)?;

    Ok(Json(cards))
}

async fn create_card(
    State(state): State<ApiState>,
    payload: Result<Json<CreateCardRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Card>), ApiError> {
    let Json(payload) = payload?;

    let card = service::create_card(&state, NewCard::from(payload), Utc::now()).await?;

    Ok((StatusCode::CREATED, Json(card)))
}

async fn get_card(
    State(state): State<ApiState>,
    card_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Card>, ApiError> {
    let Path(card_id) = card_id?;

    Ok(Json(service::get_card(&state, card_id).await?))
}

async fn delete_card(
    State(state): State<ApiState>,
    card_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(card_id) = card_id?;

    service::delete_card(&state, card_id).await?;

    Ok(Json(json!({
        "message": "Card deleted",
        "id": card_id
    })))
}

/// Card with its full review history
async fn get_card_details(
    State(state): State<ApiState>,
    card_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<CardDetails>, ApiError> {
    let Path(card_id) = card_id?;

    Ok(Json(service::card_details(&state, card_id).await?))
}
