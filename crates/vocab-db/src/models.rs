use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vocab_srs::{Card, Quality, ReviewEvent, SchedulingState};

/// Row of the `cards` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CardRow {
    pub id: i64,
    pub word: String,
    pub translation: String,
    pub grammar: Option<String>,
    pub example: Option<String>,
    pub audio_url: Option<String>,
    pub scheduling_state: String,
    pub interval_days: i64,
    pub ease_factor: f64,
    pub repetitions: i64,
    pub due_at: DateTime<Utc>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i64,
}

/// Row of the `review_events` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ReviewEventRow {
    pub id: i64,
    pub card_id: i64,
    pub quality: i64,
    pub reviewed_at: DateTime<Utc>,
    pub interval_days: i64,
    pub ease_factor: f64,
}

fn decode_err(column: &str, message: impl std::fmt::Display) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: message.to_string().into(),
    }
}

fn to_u32(column: &str, value: i64) -> Result<u32, sqlx::Error> {
    u32::try_from(value).map_err(|e| decode_err(column, e))
}

impl TryFrom<CardRow> for Card {
    type Error = sqlx::Error;

    fn try_from(row: CardRow) -> Result<Self, Self::Error> {
        let scheduling_state = row
            .scheduling_state
            .parse::<SchedulingState>()
            .map_err(|e| decode_err("scheduling_state", e))?;

        Ok(Self {
            id: row.id,
            word: row.word,
            translation: row.translation,
            grammar: row.grammar,
            example: row.example,
            audio_url: row.audio_url,
            scheduling_state,
            interval: to_u32("interval_days", row.interval_days)?,
            ease_factor: row.ease_factor,
            repetitions: to_u32("repetitions", row.repetitions)?,
            due_at: row.due_at,
            last_reviewed_at: row.last_reviewed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
            version: row.version,
        })
    }
}

impl TryFrom<ReviewEventRow> for ReviewEvent {
    type Error = sqlx::Error;

    fn try_from(row: ReviewEventRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            card_id: row.card_id,
            quality: Quality::new(row.quality).map_err(|e| decode_err("quality", e))?,
            reviewed_at: row.reviewed_at,
            interval: to_u32("interval_days", row.interval_days)?,
            ease_factor: row.ease_factor,
        })
    }
}
