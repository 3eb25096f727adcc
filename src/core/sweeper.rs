//! Background sweeper driving time-based reservation transitions.

use std::future::Future;
#[cfg(feature = "tokio-runtime")]
use std::sync::Arc;
#[cfg(feature = "tokio-runtime")]
use std::time::Duration;

#[cfg(feature = "tokio-runtime")]
use crate::core::{ReservationStore, SweepPolicy};

/// Abstraction for spawning background work on a runtime.
pub trait Spawn {
    /// Spawn a future that runs to completion on its own.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

/// Shortest interval the sweeper will tick at.
#[cfg(feature = "tokio-runtime")]
const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

#[cfg(feature = "tokio-runtime")]
impl ReservationStore {
    /// Wrap the store in an `Arc` and start its sweeper.
    ///
    /// Intervals are clamped to `1ms..=SweepPolicy::MAX_INTERVAL`. The sweeper
    /// holds only a weak handle: it ticks for as long as the store
    /// is alive and exits on the first tick after the last `Arc` is dropped.
    pub fn into_running<S: Spawn>(self, spawner: &S) -> Arc<Self> {
        let store = Arc::new(self);
        spawn_sweeper(&store, spawner);
        store
    }

    /// Build a store and start its sweeper.
    pub fn spawn<S: Spawn>(
        policy: SweepPolicy,
        clock: Arc<dyn crate::util::Clock>,
        spawner: &S,
    ) -> Arc<Self> {
        Self::new(policy, clock).into_running(spawner)
    }
}

/// Start the periodic sweep for `store` on `spawner`.
#[cfg(feature = "tokio-runtime")]
pub fn spawn_sweeper<S: Spawn>(store: &Arc<ReservationStore>, spawner: &S) {
    let weak = Arc::downgrade(store);
    let period = store
        .sweep_policy()
        .interval
        .clamp(MIN_SWEEP_INTERVAL, SweepPolicy::MAX_INTERVAL);
    tracing::debug!("starting reservation sweeper every {:?}", period);

    spawner.spawn(async move {
        let now = tokio::time::Instant::now();
        let start = now.checked_add(period).unwrap_or(now);
        let mut ticker = tokio::time::interval_at(start, period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let Some(store) = weak.upgrade() else {
                tracing::debug!("reservation store dropped, sweeper exiting");
                break;
            };
            store.sweep();
        }
    });
}

#[cfg(all(test, feature = "tokio-runtime"))]
mod tests {
    use super::*;
    use crate::core::ReservationStatus;
    use crate::runtime::TokioSpawner;
    use crate::util::ManualClock;

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_completes_expired_timer() {
        let clock = Arc::new(ManualClock::new(0));
        let spawner = TokioSpawner::current();
        let store = ReservationStore::spawn(SweepPolicy::default(), clock.clone(), &spawner);

        let r = store.enqueue_and_start("Alice", 30, 2);
        clock.advance_minutes(30);
        tokio::time::sleep(Duration::from_secs(31)).await;

        let swept = store.get(&r.id).unwrap();
        assert_eq!(swept.status, ReservationStatus::Completed);
        assert_eq!(swept.completed_at_ms, Some(30 * 60_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_clamps_oversized_interval() {
        let clock = Arc::new(ManualClock::new(0));
        let policy = SweepPolicy {
            interval: Duration::MAX,
            ..SweepPolicy::default()
        };
        let store = ReservationStore::spawn(policy, clock.clone(), &TokioSpawner::current());

        let r = store.enqueue_and_start("Alice", 30, 2);
        clock.advance_minutes(30);
        tokio::time::sleep(SweepPolicy::MAX_INTERVAL + Duration::from_secs(1)).await;

        assert_eq!(store.get(&r.id).unwrap().status, ReservationStatus::Completed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_does_not_keep_store_alive() {
        let clock = Arc::new(ManualClock::new(0));
        let store = ReservationStore::spawn(
            SweepPolicy::default(),
            clock,
            &TokioSpawner::current(),
        );
        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(Arc::strong_count(&store), 1);
        assert_eq!(Arc::weak_count(&store), 1);
    }
}
