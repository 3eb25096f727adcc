//! Builder to construct a reservation store from configuration.

use std::sync::Arc;

use crate::config::BoardConfig;
use crate::core::{AuditSink, BoardError, InMemoryAuditSink, ReservationStore};
#[cfg(feature = "tokio-runtime")]
use crate::core::Spawn;
use crate::util::{Clock, SystemClock};

/// Assembles a [`ReservationStore`] from a [`BoardConfig`].
pub struct StoreBuilder {
    config: BoardConfig,
    clock: Arc<dyn Clock>,
    audit: Option<Arc<dyn AuditSink>>,
}

impl StoreBuilder {
    /// Start from a configuration, the system clock, and the configured
    /// in-memory audit buffer.
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        let audit: Option<Arc<dyn AuditSink>> = (config.audit_capacity > 0)
            .then(|| Arc::new(InMemoryAuditSink::new(config.audit_capacity)) as Arc<dyn AuditSink>);
        Self {
            config,
            clock: Arc::new(SystemClock),
            audit,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Replace the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Disable auditing.
    #[must_use]
    pub fn without_audit(mut self) -> Self {
        self.audit = None;
        self
    }

    /// Build a store with no sweeper; callers drive [`ReservationStore::sweep`].
    pub fn build(self) -> Result<ReservationStore, BoardError> {
        self.config.validate().map_err(BoardError::Config)?;
        let store = ReservationStore::new(self.config.sweep_policy(), self.clock);
        Ok(match self.audit {
            Some(audit) => store.with_audit(audit),
            None => store,
        })
    }

    /// Build a store and start its background sweeper on `spawner`.
    #[cfg(feature = "tokio-runtime")]
    pub fn spawn<S: Spawn>(self, spawner: &S) -> Result<Arc<ReservationStore>, BoardError> {
        let store = self.build()?;
        tracing::info!("reservation board ready ({:?})", store.sweep_policy());
        Ok(store.into_running(spawner))
    }
}
