use sqlx::{Executor, Sqlite};
use vocab_srs::Card;

use crate::models::CardRow;

/// Insert a freshly created card and return its assigned id.
///
/// The card's own `id` is ignored.
pub async fn insert_card<'e, E>(executor: E, card: &Card) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar(
        // language=SQLite
        r#"
            INSERT INTO cards (
                word, translation, grammar, example, audio_url,
                scheduling_state, interval_days, ease_factor, repetitions,
                due_at, last_reviewed_at, created_at, updated_at, version
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id
        "#,
    )
    .bind(&card.word)
    .bind(&card.translation)
    .bind(&card.grammar)
    .bind(&card.example)
    .bind(&card.audio_url)
    .bind(card.scheduling_state.as_str())
    .bind(i64::from(card.interval))
    .bind(card.ease_factor)
    .bind(i64::from(card.repetitions))
    .bind(card.due_at)
    .bind(card.last_reviewed_at)
    .bind(card.created_at)
    .bind(card.updated_at)
    .bind(card.version)
    .fetch_one(executor)
    .await
}

/// Load one card, `None` when the id is unknown.
pub async fn get_card<'e, E>(executor: E, card_id: i64) -> Result<Option<Card>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row: Option<CardRow> = sqlx::query_as(
        // language=SQLite
        r#"
            SELECT id, word, translation, grammar, example, audio_url,
                   scheduling_state, interval_days, ease_factor, repetitions,
                   due_at, last_reviewed_at, created_at, updated_at, version
            FROM cards
            WHERE id = $1
        "#,
    )
    .bind(card_id)
    .fetch_optional(executor)
    .await?;

    row.map(Card::try_from).transpose()
}

/// All cards, newest first.
pub async fn list_cards<'e, E>(executor: E) -> Result<Vec<Card>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows: Vec<CardRow> = sqlx::query_as(
        // language=SQLite
        r#"
            SELECT id, word, translation, grammar, example, audio_url,
                   scheduling_state, interval_days, ease_factor, repetitions,
                   due_at, last_reviewed_at, created_at, updated_at, version
            FROM cards
            ORDER BY id DESC
        "#,
    )
    .fetch_all(executor)
    .await?;

    rows.into_iter().map(Card::try_from).collect()
}

/// Write the scheduling fields of `card` if the stored version still equals
/// `expected_version`.
///
/// Returns `false` when no row matched, either because the card is gone or
/// because another writer got there first.
pub async fn update_card_schedule<'e, E>(
    executor: E,
    card: &Card,
    expected_version: i64,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        // language=SQLite
        r#"
            UPDATE cards
            SET scheduling_state = $1,
                interval_days = $2,
                ease_factor = $3,
                repetitions = $4,
                due_at = $5,
                last_reviewed_at = $6,
                updated_at = $7,
                version = $8
            WHERE id = $9 AND version = $10
        "#,
    )
    .bind(card.scheduling_state.as_str())
    .bind(i64::from(card.interval))
    .bind(card.ease_factor)
    .bind(i64::from(card.repetitions))
    .bind(card.due_at)
    .bind(card.last_reviewed_at)
    .bind(card.updated_at)
    .bind(card.version)
    .bind(card.id)
    .bind(expected_version)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a card. Returns whether it existed.
pub async fn delete_card<'e, E>(executor: E, card_id: i64) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        // language=SQLite
        r#"
            DELETE FROM cards
            WHERE id = $1
        "#,
    )
    .bind(card_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}
