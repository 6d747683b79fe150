use chrono::{DateTime, Duration, Utc};

use crate::{
    card::{Card, Quality, ReviewEvent, SchedulingState},
    config::SchedulerConfig,
};

/// Apply one review to a card.
///
/// Returns the updated card and the review event to append to its history.
/// The input card is left untouched; persisting both results together is the
/// caller's responsibility.
///
/// # Algorithm
///
/// * Fail (quality 1 or 2): repetitions reset to 0, interval drops to
///   `min_interval_days`, ease loses `fail_ease_penalty`.
/// * Pass (quality 3..=5): ease is adjusted first (`+easy_bonus` for 5,
///   unchanged for 4, `-hard_penalty` for 3), then repetitions grow by one.
///   The first and second consecutive passes use the fixed seed intervals;
///   from the third on the previous interval is multiplied by the new ease.
///
/// Ease never drops below `min_ease`, and `due_at` is `now + interval` days.
pub fn submit_review(
    card: &Card,
    quality: Quality,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
) -> (Card, ReviewEvent) {
    let (interval, ease_factor, repetitions) = if quality.is_pass() {
        let ease_factor = (card.ease_factor + ease_delta(quality, config)).max(config.min_ease);
        let repetitions = card.repetitions.saturating_add(1);
        let interval = match repetitions {
            1 => config.first_interval_days,
            2 => config.second_interval_days,
            _ => grow_interval(card.interval, ease_factor),
        };
        (interval, ease_factor, repetitions)
    } else {
        let ease_factor = (card.ease_factor - config.fail_ease_penalty).max(config.min_ease);
        (config.min_interval_days, ease_factor, 0)
    };

    let updated = Card {
        scheduling_state: SchedulingState::derive(true, interval, config),
        interval,
        ease_factor,
        repetitions,
        due_at: due_after(now, interval),
        last_reviewed_at: Some(now),
        updated_at: now,
        version: card.version + 1,
        ..card.clone()
    };

    let event = ReviewEvent {
        id: 0,
        card_id: card.id,
        quality,
        reviewed_at: now,
        interval,
        ease_factor,
    };

    (updated, event)
}

/// Rebuild a card's scheduling state from its review history.
///
/// Starts from the card reset to New and applies every event in
/// (`reviewed_at`, `id`) order, using each event's timestamp as the clock.
/// The result matches the stored card when history and card are consistent.
pub fn replay(card: &Card, events: &[ReviewEvent], config: &SchedulerConfig) -> Card {
    let mut ordered: Vec<&ReviewEvent> = events.iter().collect();
    ordered.sort_by_key(|event| (event.reviewed_at, event.id));

    ordered
        .into_iter()
        .fold(card.reset(config), |current, event| {
            submit_review(&current, event.quality, event.reviewed_at, config).0
        })
}

/// Whether two cards agree on every field the scheduler controls.
pub fn same_schedule(a: &Card, b: &Card) -> bool {
    a.scheduling_state == b.scheduling_state
        && a.interval == b.interval
        && a.ease_factor.to_bits() == b.ease_factor.to_bits()
        && a.repetitions == b.repetitions
        && a.due_at == b.due_at
        && a.last_reviewed_at == b.last_reviewed_at
}

fn ease_delta(quality: Quality, config: &SchedulerConfig) -> f64 {
    match quality.value() {
        5 => config.easy_bonus,
        4 => 0.0,
        _ => -config.hard_penalty,
    }
}

fn grow_interval(interval: u32, ease_factor: f64) -> u32 {
    let grown = (f64::from(interval) * ease_factor).round();
    if grown >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        (grown as u32).max(interval).max(1)
    }
}

/// `now + interval` days, saturating at the latest representable instant.
pub fn due_after(now: DateTime<Utc>, interval_days: u32) -> DateTime<Utc> {
    now.checked_add_signed(Duration::days(i64::from(interval_days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
