use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use vocab_srs::{Card, CardContent, Quality, ReviewEvent};

use crate::normalization::{normalize_block, normalize_line};

/// Body of `POST /api/cards`.
///
/// Missing required fields deserialize to empty strings so they are reported
/// by validation rather than by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreateCardRequest {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub translation: String,
    pub grammar: Option<String>,
    pub example: Option<String>,
    pub audio_url: Option<String>,
}

/// Normalized card content, ready for validation.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewCard {
    #[validate(length(min = 1, max = 255))]
    pub word: String,
    #[validate(length(min = 1, max = 500))]
    pub translation: String,
    #[validate(length(max = 20000))]
    pub grammar: Option<String>,
    #[validate(length(max = 20000))]
    pub example: Option<String>,
    #[validate(length(max = 500))]
    pub audio_url: Option<String>,
}

impl From<CreateCardRequest> for NewCard {
    fn from(request: CreateCardRequest) -> Self {
        Self {
            word: normalize_line(&request.word),
            translation: normalize_line(&request.translation),
            grammar: normalize_block(request.grammar.as_deref()),
            example: normalize_block(request.example.as_deref()),
            audio_url: request
                .audio_url
                .as_deref()
                .map(normalize_line)
                .filter(|url| !url.is_empty()),
        }
    }
}

impl From<NewCard> for CardContent {
    fn from(card: NewCard) -> Self {
        Self {
            word: card.word,
            translation: card.translation,
            grammar: card.grammar,
            example: card.example,
            audio_url: card.audio_url,
        }
    }
}

/// One entry of a card's review history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub quality: Quality,
    pub reviewed_at: DateTime<Utc>,
}

impl From<&ReviewEvent> for HistoryEntry {
    fn from(event: &ReviewEvent) -> Self {
        Self {
            id: event.id,
            quality: event.quality,
            reviewed_at: event.reviewed_at,
        }
    }
}

/// Response of `GET /api/cards/{card_id}/details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDetails {
    #[serde(flatten)]
    pub card: Card,
    pub history: Vec<HistoryEntry>,
}
