//! Runtime adapters and the caller-facing API surface.

pub mod api;
#[cfg(feature = "tokio-runtime")]
pub mod tokio_spawner;

pub use api::{
    format_duration, parse_duration, remaining_label, AddRequest, BoardService, FormState,
    Health, QueueView, ReservationView,
};
#[cfg(feature = "tokio-runtime")]
pub use tokio_spawner::TokioSpawner;
