//! Per-card write serialisation.
//!
//! Reviews of the same card must not interleave, otherwise two submissions
//! computed from the same snapshot would race on `interval`, `ease_factor`
//! and `repetitions`. Reviews of different cards take different locks and
//! run in parallel. The version check in storage still catches writers in
//! other processes.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Clone, Debug, Default)]
pub struct CardLocks {
    inner: Arc<Mutex<HashMap<i64, Arc<AsyncMutex<()>>>>>,
}

impl CardLocks {
    /// Wait for exclusive access to `card_id`. Released when the guard drops.
    pub async fn lock(&self, card_id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            // Entries nobody holds or waits on are only referenced by the map.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(card_id).or_default())
        };

        lock.lock_owned().await
    }

    /// Number of cards with a live lock entry.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_same_card_is_exclusive() {
        let locks = CardLocks::default();
        let guard = locks.lock(1).await;

        let contender = locks.clone();
        let waiting = tokio::spawn(async move {
            let _guard = contender.lock(1).await;
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiting.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), waiting)
            .await
            .expect("waiter should acquire the lock after release")
            .unwrap();
    }

    #[tokio::test]
    async fn test_different_cards_do_not_block() {
        let locks = CardLocks::default();
        let _first = locks.lock(1).await;
        let second = tokio::time::timeout(Duration::from_millis(200), locks.lock(2)).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_released_entries_are_pruned() {
        let locks = CardLocks::default();
        for card_id in 0..10 {
            drop(locks.lock(card_id).await);
        }
        // Each new lock call prunes released entries, so only the last one remains.
        assert_eq!(locks.len(), 1);
        drop(locks.lock(99).await);
        assert_eq!(locks.len(), 1);
        assert!(!locks.is_empty());
    }
}
