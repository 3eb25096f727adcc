//! Reservation lifecycle audit trail.
//!
//! The store reports every transition it performs to an optional sink. The
//! in-memory sink keeps a bounded ring of recent events for inspection.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Transition recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Added to the queue waiting.
    Enqueue,
    /// Timer started.
    Start,
    /// Timer expired during a sweep.
    Complete,
    /// Dropped by the sweep after the grace period.
    Evict,
    /// Removed on request.
    Remove,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Enqueue => "enqueue",
            Self::Start => "start",
            Self::Complete => "complete",
            Self::Evict => "evict",
            Self::Remove => "remove",
        };
        f.write_str(name)
    }
}

/// Audit event structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Reservation the event refers to.
    pub reservation_id: String,
    /// Holder name at the time of the event.
    pub name: String,
    /// What happened.
    pub action: AuditAction,
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
}

/// Audit sink abstraction.
///
/// The store calls [`AuditSink::record`] while it holds its write lock, so
/// events arrive in the order the changes were applied. Implementations must
/// not block or call back into the store.
pub trait AuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: AuditEvent);
}

/// Bounded in-memory audit sink. Clones share the same buffer.
#[derive(Debug, Clone)]
pub struct InMemoryAuditSink {
    events: Arc<Mutex<VecDeque<AuditEvent>>>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Arc::new(Mutex::new(VecDeque::with_capacity(max_events.min(1024)))),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().iter().cloned().collect()
    }

    /// Events recorded for one reservation, oldest first.
    #[must_use]
    pub fn events_for(&self, reservation_id: &str) -> Vec<AuditEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.reservation_id == reservation_id)
            .cloned()
            .collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&self, event: AuditEvent) {
        if self.max_events == 0 {
            return;
        }
        let mut events = self.events.lock();
        if events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(event);
    }
}

/// Helper to build an audit event from context.
pub fn build_audit_event(
    reservation_id: impl Into<String>,
    name: impl Into<String>,
    action: AuditAction,
    created_at_ms: u128,
) -> AuditEvent {
    AuditEvent {
        reservation_id: reservation_id.into(),
        name: name.into(),
        action,
        created_at_ms,
    }
}
