use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::card::{Card, SchedulingState};

/// Aggregate counts over a deck.
///
/// `new + learning + mature == total` always holds. `due` only counts cards
/// that have been reviewed at least once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// All cards.
    pub total: u64,
    /// Never reviewed.
    pub new: u64,
    /// Reviewed, below the maturity threshold.
    pub learning: u64,
    /// At or above the maturity threshold.
    pub mature: u64,
    /// Reviewed cards with `due_at <= now`.
    pub due: u64,
}

/// Count cards per scheduling state and how many reviewed cards are due.
pub fn compute_stats<'a, I>(cards: I, now: DateTime<Utc>) -> Stats
where
    I: IntoIterator<Item = &'a Card>,
{
    cards.into_iter().fold(Stats::default(), |mut stats, card| {
        stats.total += 1;
        match card.scheduling_state {
            SchedulingState::New => stats.new += 1,
            SchedulingState::Learning => stats.learning += 1,
            SchedulingState::Mature => stats.mature += 1,
        }
        if !card.is_new() && card.is_due(now) {
            stats.due += 1;
        }
        stats
    })
}

/// Cards to study now, oldest due first.
///
/// Includes every card with `due_at <= now` and every New card regardless of
/// its due date. Ties on `due_at` are broken by ascending id. `limit`
/// truncates the ordered result.
pub fn due_queue<'a, I>(cards: I, now: DateTime<Utc>, limit: Option<usize>) -> Vec<Card>
where
    I: IntoIterator<Item = &'a Card>,
{
    let mut queue: Vec<Card> = cards
        .into_iter()
        .filter(|card| card.is_new() || card.is_due(now))
        .cloned()
        .collect();

    queue.sort_by(|a, b| a.due_at.cmp(&b.due_at).then(a.id.cmp(&b.id)));

    if let Some(limit) = limit {
        queue.truncate(limit);
    }

    queue
}
