//! Shared utilities: clocks, identifiers, and tracing setup.

pub mod clock;
pub mod id;
pub mod telemetry;

pub use clock::{now_ms, Clock, ManualClock, SystemClock};
pub use id::reservation_id;
pub use telemetry::{init_tracing, init_tracing_with_default};
