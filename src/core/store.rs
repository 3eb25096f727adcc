//! Shared reservation store with a periodic sweep.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::core::{build_audit_event, AuditAction, AuditEvent, AuditSink};
use crate::core::{Reservation, ReservationStatus};
use crate::util::{Clock, SystemClock};

/// Timing for the background sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepPolicy {
    /// Time between sweep passes.
    pub interval: Duration,
    /// How long a completed reservation stays visible.
    pub grace_period: Duration,
}

impl SweepPolicy {
    /// Default sweep interval.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);
    /// Default grace period for completed reservations.
    pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(5 * 60);
    /// Longest interval the sweeper will wait between passes.
    pub const MAX_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);
    /// Longest grace period a configuration may ask for.
    pub const MAX_GRACE_PERIOD: Duration = Duration::from_secs(7 * 24 * 60 * 60);
}

impl Default for SweepPolicy {
    fn default() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
            grace_period: Self::DEFAULT_GRACE_PERIOD,
        }
    }
}

/// Outcome of one sweep pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Reservations moved from in-progress to completed.
    pub completed: usize,
    /// Completed reservations dropped after the grace period.
    pub evicted: usize,
    /// In-progress records skipped because their timer state was unreadable.
    pub skipped: usize,
}

/// Ordered, lock-guarded collection of reservations.
///
/// Insertion order is queue order. Mutations take the write lock, queries take
/// the read lock, and every query hands back owned copies. Time-driven status
/// changes happen only in [`ReservationStore::sweep`]; reads compute derived
/// timer state without writing it back.
pub struct ReservationStore {
    items: RwLock<Vec<Reservation>>,
    clock: Arc<dyn Clock>,
    policy: SweepPolicy,
    audit: Option<Arc<dyn AuditSink>>,
}

impl ReservationStore {
    /// Create a store with no background sweeper attached.
    pub fn new(policy: SweepPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            clock,
            policy,
            audit: None,
        }
    }

    /// Store on the system clock with default timing.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(SweepPolicy::default(), Arc::new(SystemClock))
    }

    /// Attach an audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Sweep timing in effect.
    #[must_use]
    pub const fn sweep_policy(&self) -> SweepPolicy {
        self.policy
    }

    /// Current time according to the store's clock.
    #[must_use]
    pub fn now_ms(&self) -> u128 {
        self.clock.now_ms()
    }

    /// Append a waiting reservation and return a copy of it.
    pub fn enqueue(&self, name: impl Into<String>, loads: u32) -> Reservation {
        let reservation = Reservation::waiting(name, loads, self.now_ms());
        {
            let mut items = self.items.write();
            items.push(reservation.clone());
            self.record(&reservation, AuditAction::Enqueue, reservation.queued_at_ms);
        }
        tracing::info!("reservation {} enqueued for {}", reservation.id, reservation.name);
        reservation
    }

    /// Append a reservation whose timer starts now and return a copy of it.
    ///
    /// Callers only use this when the board is idle.
    pub fn enqueue_and_start(
        &self,
        name: impl Into<String>,
        duration_minutes: u32,
        loads: u32,
    ) -> Reservation {
        let reservation = Reservation::started(name, duration_minutes, loads, self.now_ms());
        {
            let mut items = self.items.write();
            items.push(reservation.clone());
            self.record(&reservation, AuditAction::Enqueue, reservation.queued_at_ms);
            self.record(&reservation, AuditAction::Start, reservation.queued_at_ms);
        }
        tracing::info!(
            "reservation {} started immediately for {} ({} min)",
            reservation.id,
            reservation.name,
            duration_minutes
        );
        reservation
    }

    /// Start immediately if nothing is waiting or running, otherwise wait.
    ///
    /// The idle check and the append happen under one write lock, so two
    /// concurrent callers cannot both start on an idle board.
    pub fn enqueue_or_start(
        &self,
        name: impl Into<String>,
        duration_minutes: Option<u32>,
        loads: u32,
    ) -> Reservation {
        let now = self.now_ms();
        let reservation = {
            let mut items = self.items.write();
            let idle = !items.iter().any(|r| r.is_queued(now));
            let reservation = match duration_minutes {
                Some(minutes) if idle => Reservation::started(name, minutes, loads, now),
                _ => Reservation::waiting(name, loads, now),
            };
            items.push(reservation.clone());
            self.record(&reservation, AuditAction::Enqueue, now);
            if reservation.status == ReservationStatus::InProgress {
                self.record(&reservation, AuditAction::Start, now);
            }
            reservation
        };
        tracing::info!(
            "reservation {} added for {} as {}",
            reservation.id,
            reservation.name,
            reservation.status
        );
        reservation
    }

    /// Start the timer on a waiting reservation.
    ///
    /// Returns false, changing nothing, if the id is absent or the reservation
    /// is not waiting.
    pub fn start_timer(&self, id: &str, duration_minutes: u32) -> bool {
        let now = self.now_ms();
        let mut items = self.items.write();
        let Some(reservation) = items.iter_mut().find(|r| r.id == id) else {
            tracing::debug!("reservation {id} not found, timer not started");
            return false;
        };
        if !reservation.begin(duration_minutes, now) {
            tracing::debug!("reservation {id} not waiting, timer not started");
            return false;
        }
        self.record(reservation, AuditAction::Start, now);
        drop(items);
        tracing::info!("reservation {id} timer started ({duration_minutes} min)");
        true
    }

    /// Delete a reservation regardless of status.
    pub fn remove(&self, id: &str) -> bool {
        let now = self.now_ms();
        let removed = {
            let mut items = self.items.write();
            let removed = items
                .iter()
                .position(|r| r.id == id)
                .map(|idx| items.remove(idx));
            if let Some(reservation) = &removed {
                self.record(reservation, AuditAction::Remove, now);
            }
            removed.is_some()
        };
        if removed {
            tracing::info!("reservation {id} removed");
        }
        removed
    }

    /// Ordered copy of every reservation on the board.
    #[must_use]
    pub fn snapshot_all(&self) -> Vec<Reservation> {
        self.items.read().clone()
    }

    /// Copy of one reservation.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Reservation> {
        self.items.read().iter().find(|r| r.id == id).cloned()
    }

    /// Number of reservations held, including completed ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// True when the board holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// True while some timer is running and has not run out.
    #[must_use]
    pub fn has_active_load(&self) -> bool {
        let now = self.now_ms();
        self.items.read().iter().any(|r| r.is_active(now))
    }

    /// True if anyone is waiting or has a running timer.
    #[must_use]
    pub fn has_any_queue_items(&self) -> bool {
        let now = self.now_ms();
        self.items.read().iter().any(|r| r.is_queued(now))
    }

    /// 1-based rank among waiting reservations, `None` if absent or not waiting.
    #[must_use]
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.items
            .read()
            .iter()
            .filter(|r| r.status == ReservationStatus::Waiting)
            .position(|r| r.id == id)
            .map(|idx| idx + 1)
    }

    /// Ordered copy of the board with each waiting reservation's 1-based
    /// position, taken under one read lock.
    #[must_use]
    pub fn snapshot_with_positions(&self) -> Vec<(Reservation, Option<usize>)> {
        let items = self.items.read();
        let mut waiting = 0_usize;
        items
            .iter()
            .map(|r| {
                let position = (r.status == ReservationStatus::Waiting).then(|| {
                    waiting += 1;
                    waiting
                });
                (r.clone(), position)
            })
            .collect()
    }

    /// Expire finished timers, then evict completed reservations past the
    /// grace period.
    ///
    /// Waiting and still-running reservations are never removed.
    pub fn sweep(&self) -> SweepReport {
        let now = self.now_ms();
        let grace_ms = self.policy.grace_period.as_millis();
        let mut report = SweepReport::default();
        let mut events = Vec::new();

        {
            let mut items = self.items.write();
            for reservation in items.iter_mut() {
                if reservation.status != ReservationStatus::InProgress {
                    continue;
                }
                if reservation.end_time_ms().is_none() {
                    tracing::warn!(
                        "reservation {} in progress without timer, skipping",
                        reservation.id
                    );
                    report.skipped += 1;
                    continue;
                }
                if reservation.is_expired(now) && reservation.complete(now) {
                    report.completed += 1;
                    events.push(build_audit_event(
                        reservation.id.clone(),
                        reservation.name.clone(),
                        AuditAction::Complete,
                        now,
                    ));
                }
            }

            items.retain(|r| {
                let evict = r.should_evict(now, grace_ms);
                if evict {
                    report.evicted += 1;
                    events.push(build_audit_event(
                        r.id.clone(),
                        r.name.clone(),
                        AuditAction::Evict,
                        now,
                    ));
                }
                !evict
            });
            self.record_all(events);
        }

        if report.completed > 0 || report.evicted > 0 {
            tracing::info!(
                "sweep completed {} and evicted {} reservations",
                report.completed,
                report.evicted
            );
        } else {
            tracing::debug!("sweep found nothing to do");
        }
        report
    }

    // Called with the write lock held so the trail follows lock order.
    fn record(&self, reservation: &Reservation, action: AuditAction, at_ms: u128) {
        if let Some(audit) = &self.audit {
            audit.record(build_audit_event(
                reservation.id.as_str(),
                reservation.name.as_str(),
                action,
                at_ms,
            ));
        }
    }

    fn record_all(&self, events: Vec<AuditEvent>) {
        if let Some(audit) = &self.audit {
            for event in events {
                audit.record(event);
            }
        }
    }
}

impl std::fmt::Debug for ReservationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationStore")
            .field("len", &self.len())
            .field("policy", &self.policy)
            .field("audit", &self.audit.is_some())
            .finish_non_exhaustive()
    }
}
