use chrono::{DateTime, Utc};
use validator::Validate;
use vocab_db::repositories::{card as card_repo, review as review_repo};
use vocab_srs::Card;

use super::model::{CardDetails, HistoryEntry, NewCard};
use crate::{ApiState, error::ApiError, metrics};

/// Validate and store a new card. It starts New and due immediately.
pub async fn create_card(
    state: &ApiState,
    new_card: NewCard,
    now: DateTime<Utc>,
) -> Result<Card, ApiError> {
    new_card.validate()?;

    let mut card = Card::new(0, new_card.into(), now, &state.scheduler);
    card.id = card_repo::insert_card(&state.pool, &card)
        .await
        .map_err(ApiError::Database)?;

    metrics::record_card_event("created");
    tracing::info!(card_id = card.id, word = %card.word, "Card created");

    Ok(card)
}

pub async fn get_card(state: &ApiState, card_id: i64) -> Result<Card, ApiError> {
    card_repo::get_card(&state.pool, card_id)
        .await
        .map_err(ApiError::Database)?
        .ok_or_else(|| ApiError::card_not_found(card_id))
}

/// Delete a card together with its review history.
pub async fn delete_card(state: &ApiState, card_id: i64) -> Result<(), ApiError> {
    let _guard = state.card_locks.lock(card_id).await;

    let mut tx = state.pool.begin().await.map_err(ApiError::Database)?;

    let events = review_repo::delete_review_events(&mut *tx, card_id)
        .await
        .map_err(ApiError::Database)?;
    let deleted = card_repo::delete_card(&mut *tx, card_id)
        .await
        .map_err(ApiError::Database)?;
    if !deleted {
        // Dropping the transaction rolls it back.
        return Err(ApiError::card_not_found(card_id));
    }

    tx.commit().await.map_err(ApiError::Database)?;

    metrics::record_card_event("deleted");
    tracing::info!(card_id, review_events = events, "Card deleted");

    Ok(())
}

/// A card with its review history ordered by review time.
///
/// The history is replayed against the stored card; a mismatch means the two
/// were written inconsistently and is logged.
pub async fn card_details(state: &ApiState, card_id: i64) -> Result<CardDetails, ApiError> {
    let mut tx = state.pool.begin().await.map_err(ApiError::Database)?;

    let card = card_repo::get_card(&mut *tx, card_id)
        .await
        .map_err(ApiError::Database)?
        .ok_or_else(|| ApiError::card_not_found(card_id))?;
    let mut events = review_repo::list_review_events(&mut *tx, card_id)
        .await
        .map_err(ApiError::Database)?;

    tx.commit().await.map_err(ApiError::Database)?;

    events.sort_by_key(|event| (event.reviewed_at, event.id));

    let replayed = vocab_srs::replay(&card, &events, &state.scheduler);
    if !vocab_srs::same_schedule(&replayed, &card) {
        tracing::warn!(
            card_id,
            stored_interval = card.interval,
            replayed_interval = replayed.interval,
            stored_repetitions = card.repetitions,
            replayed_repetitions = replayed.repetitions,
            "Review history does not reproduce stored schedule"
        );
    }

    Ok(CardDetails {
        history: events.iter().map(HistoryEntry::from).collect(),
        card,
    })
}
