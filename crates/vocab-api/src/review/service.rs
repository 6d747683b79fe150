use chrono::{DateTime, Utc};
use vocab_db::repositories::{card as card_repo, review as review_repo};
use vocab_srs::{Card, Quality, ReviewEvent};

use crate::{ApiState, error::ApiError, metrics};

/// Apply a review to a stored card.
///
/// Holds the card's lock while the current state is read and the review is
/// written, so reviews of one card never interleave within this process.
pub async fn submit_review(
    state: &ApiState,
    card_id: i64,
    quality: Quality,
    now: DateTime<Utc>,
) -> Result<(Card, ReviewEvent), ApiError> {
    let _guard = state.card_locks.lock(card_id).await;

    let card = card_repo::get_card(&state.pool, card_id)
        .await
        .map_err(ApiError::Database)?
        .ok_or_else(|| ApiError::card_not_found(card_id))?;

    apply_review(state, &card, quality, now).await
}

/// Write a review computed from the snapshot `card`.
///
/// The card update and the history append are written in one transaction,
/// so either both land or neither does. The update is conditioned on the
/// snapshot's version; if another writer got there first the result is
/// [`ApiError::ConcurrentModification`], or `NotFound` when the card was
/// deleted, and nothing is written.
///
/// `now` is clamped to the card's last review so history stays in the
/// order it was applied even if the clock steps back.
pub async fn apply_review(
    state: &ApiState,
    card: &Card,
    quality: Quality,
    now: DateTime<Utc>,
) -> Result<(Card, ReviewEvent), ApiError> {
    let card_id = card.id;
    let now = card.last_reviewed_at.map_or(now, |last| now.max(last));

    let (updated, mut event) = vocab_srs::submit_review(card, quality, now, &state.scheduler);

    // The first statement writes, so SQLite takes the write lock up front.
    let mut tx = state.pool.begin().await.map_err(ApiError::Database)?;

    let written = card_repo::update_card_schedule(&mut *tx, &updated, card.version)
        .await
        .map_err(ApiError::Database)?;
    if !written {
        let exists = card_repo::get_card(&mut *tx, card_id)
            .await
            .map_err(ApiError::Database)?
            .is_some();
        metrics::record_review(quality, "conflict");
        return Err(if exists {
            ApiError::ConcurrentModification(card_id)
        } else {
            ApiError::card_not_found(card_id)
        });
    }

    event.id = review_repo::insert_review_event(&mut *tx, &event)
        .await
        .map_err(ApiError::Database)?;

    tx.commit().await.map_err(ApiError::Database)?;

    metrics::record_review(quality, if quality.is_pass() { "pass" } else { "fail" });
    tracing::info!(
        card_id,
        quality = quality.value(),
        interval = updated.interval,
        ease_factor = updated.ease_factor,
        repetitions = updated.repetitions,
        state = %updated.scheduling_state,
        due_at = %updated.due_at,
        "Review recorded"
    );

    Ok((updated, event))
}
