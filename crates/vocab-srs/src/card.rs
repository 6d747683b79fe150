use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{config::SchedulerConfig, error::SrsError};

/// Recall rating submitted with a review.
///
/// The study client sends 1 (again), 3 (hard), 4 (good) and 5 (easy).
/// 2 is accepted as a failing grade between "again" and "hard".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Quality(u8);

impl Quality {
    /// Failed to recall.
    pub const AGAIN: Self = Self(1);
    /// Recalled with serious difficulty.
    pub const HARD: Self = Self(3);
    /// Recalled after hesitation.
    pub const GOOD: Self = Self(4);
    /// Perfect recall.
    pub const EASY: Self = Self(5);

    /// Lowest quality that counts as a successful recall.
    pub const PASS_THRESHOLD: u8 = 3;

    /// Validate a raw rating.
    pub fn new(value: i64) -> Result<Self, SrsError> {
        match value {
            1..=5 => Ok(Self(value as u8)),
            _ => Err(SrsError::InvalidQuality(value)),
        }
    }

    /// The raw rating, 1..=5.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether the rating counts as a successful recall (3 or higher).
    pub const fn is_pass(self) -> bool {
        self.0 >= Self::PASS_THRESHOLD
    }
}

impl TryFrom<i64> for Quality {
    type Error = SrsError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a card sits in the learning lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulingState {
    /// Never reviewed.
    New,
    /// Reviewed, interval below the maturity threshold.
    Learning,
    /// Interval at or above the maturity threshold.
    Mature,
}

impl SchedulingState {
    /// Derive the state from review history and current interval.
    pub const fn derive(reviewed: bool, interval: u32, config: &SchedulerConfig) -> Self {
        if !reviewed {
            Self::New
        } else if interval >= config.maturity_threshold_days {
            Self::Mature
        } else {
            Self::Learning
        }
    }

    /// Lowercase name used in JSON and storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Learning => "learning",
            Self::Mature => "mature",
        }
    }
}

impl fmt::Display for SchedulingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchedulingState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "learning" => Ok(Self::Learning),
            "mature" => Ok(Self::Mature),
            other => Err(format!("unknown scheduling state '{other}'")),
        }
    }
}

/// Content fields of a card. Opaque to the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardContent {
    /// Word or phrase being learned.
    pub word: String,
    /// Meaning shown on the back of the card.
    pub translation: String,
    /// Free-form grammar notes.
    pub grammar: Option<String>,
    /// Example sentence.
    pub example: Option<String>,
    /// Pronunciation audio location, stored as given.
    pub audio_url: Option<String>,
}

/// A vocabulary card together with its scheduling state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Storage-assigned identifier, ascending with creation order.
    pub id: i64,
    /// Word or phrase being learned.
    pub word: String,
    /// Meaning shown on the back of the card.
    pub translation: String,
    /// Free-form grammar notes.
    pub grammar: Option<String>,
    /// Example sentence.
    pub example: Option<String>,
    /// Pronunciation audio location, stored as given.
    pub audio_url: Option<String>,
    /// Lifecycle state derived from history and interval.
    pub scheduling_state: SchedulingState,
    /// Days until the next review after the latest one.
    pub interval: u32,
    /// SM-2 ease factor, never below the configured floor.
    pub ease_factor: f64,
    /// Consecutive passing reviews.
    pub repetitions: u32,
    /// When the card should next be studied.
    pub due_at: DateTime<Utc>,
    /// Time of the latest review; `None` while the card is New.
    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// Creation time. Also the initial `due_at`.
    pub created_at: DateTime<Utc>,
    /// Time of the latest write.
    pub updated_at: DateTime<Utc>,
    /// Bumped on every scheduling write; used for optimistic concurrency.
    pub version: i64,
}

impl Card {
    /// A never-reviewed card, due immediately.
    pub fn new(id: i64, content: CardContent, now: DateTime<Utc>, config: &SchedulerConfig) -> Self {
        Self {
            id,
            word: content.word,
            translation: content.translation,
            grammar: content.grammar,
            example: content.example,
            audio_url: content.audio_url,
            scheduling_state: SchedulingState::New,
            interval: 0,
            ease_factor: config.initial_ease,
            repetitions: 0,
            due_at: now,
            last_reviewed_at: None,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    /// Whether the card has never been reviewed.
    pub const fn is_new(&self) -> bool {
        matches!(self.scheduling_state, SchedulingState::New)
    }

    /// Whether `due_at` has been reached at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at <= now
    }

    /// The same card reset to its freshly created state, keeping identity and content.
    pub fn reset(&self, config: &SchedulerConfig) -> Self {
        let content = CardContent {
            word: self.word.clone(),
            translation: self.translation.clone(),
            grammar: self.grammar.clone(),
            example: self.example.clone(),
            audio_url: self.audio_url.clone(),
        };
        Self::new(self.id, content, self.created_at, config)
    }
}

/// Immutable record of one submitted review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewEvent {
    /// Zero until the event has been persisted.
    pub id: i64,
    /// Card the review was submitted for.
    pub card_id: i64,
    /// Submitted rating.
    pub quality: Quality,
    /// Clock used when the review was applied.
    pub reviewed_at: DateTime<Utc>,
    /// Interval the review produced.
    pub interval: u32,
    /// Ease factor the review produced.
    pub ease_factor: f64,
}
