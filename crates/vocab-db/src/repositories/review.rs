use sqlx::{Executor, Sqlite};
use vocab_srs::ReviewEvent;

use crate::models::ReviewEventRow;

/// Append a review event and return its id.
pub async fn insert_review_event<'e, E>(executor: E, event: &ReviewEvent) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar(
        // language=SQLite
        r#"
            INSERT INTO review_events (card_id, quality, reviewed_at, interval_days, ease_factor)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
        "#,
    )
    .bind(event.card_id)
    .bind(i64::from(event.quality.value()))
    .bind(event.reviewed_at)
    .bind(i64::from(event.interval))
    .bind(event.ease_factor)
    .fetch_one(executor)
    .await
}

/// Review history of a card in insertion order.
pub async fn list_review_events<'e, E>(
    executor: E,
    card_id: i64,
) -> Result<Vec<ReviewEvent>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows: Vec<ReviewEventRow> = sqlx::query_as(
        // language=SQLite
        r#"
            SELECT id, card_id, quality, reviewed_at, interval_days, ease_factor
            FROM review_events
            WHERE card_id = $1
            ORDER BY id ASC
        "#,
    )
    .bind(card_id)
    .fetch_all(executor)
    .await?;

    rows.into_iter().map(ReviewEvent::try_from).collect()
}

/// Remove a card's history. Returns the number of deleted events.
pub async fn delete_review_events<'e, E>(executor: E, card_id: i64) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        // language=SQLite
        r#"
            DELETE FROM review_events
            WHERE card_id = $1
        "#,
    )
    .bind(card_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}
