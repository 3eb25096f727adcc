//! Reservation records, the shared store, and its background sweep.

pub mod audit;
pub mod error;
pub mod reservation;
pub mod store;
pub mod sweeper;

pub use audit::{build_audit_event, AuditAction, AuditEvent, AuditSink, InMemoryAuditSink};
pub use error::{AppResult, BoardError};
pub use reservation::{Reservation, ReservationStatus, MS_PER_MINUTE};
pub use store::{ReservationStore, SweepPolicy, SweepReport};
#[cfg(feature = "tokio-runtime")]
pub use sweeper::spawn_sweeper;
pub use sweeper::Spawn;
