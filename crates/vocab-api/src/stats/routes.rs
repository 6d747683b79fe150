use axum::{Json, Router, extract::State, routing::get};
use chrono::Utc;
use vocab_db::repositories::card as card_repo;
use vocab_srs::Stats;

use crate::{ApiState, error::ApiError};

/// Create the stats routes
pub fn routes() -> Router<ApiState> {
    Router::new().route("/stats", get(get_stats))
}

/// Deck totals: `{total, new, learning, mature, due}`
///
/// The home view reads `new`, `due` and `total`; the stats view reads all five.
async fn get_stats(State(state): State<ApiState>) -> Result<Json<Stats>, ApiError> {
    let cards = card_repo::list_cards(&state.pool)
        .await
        .map_err(ApiError::Database)?;

    Ok(Json(vocab_srs::compute_stats(&cards, Utc::now())))
}
