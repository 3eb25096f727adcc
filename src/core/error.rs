//! Error types for board operations.

use thiserror::Error;

use super::ReservationStatus;

/// Errors surfaced to callers of the board service.
///
/// Store operations never fail; they report absent ids or refused transitions
/// through `bool` and `Option`. These variants exist for the caller-side
/// validation and for turning those outcomes into user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Holder name was empty or whitespace.
    #[error("name is required")]
    EmptyName,
    /// No load count was supplied.
    #[error("number of loads is required")]
    MissingLoads,
    /// Load count was not a number within the configured range.
    #[error("invalid number of loads `{value}` (must be {min}-{max})")]
    InvalidLoads {
        /// Raw value as supplied.
        value: String,
        /// Inclusive lower bound.
        min: u32,
        /// Inclusive upper bound.
        max: u32,
    },
    /// Duration was missing, non-numeric, or not positive.
    #[error("invalid duration `{0}`")]
    InvalidDuration(String),
    /// Request did not name a reservation.
    #[error("missing reservation id")]
    MissingId,
    /// No reservation with this id is on the board.
    #[error("reservation not found: {0}")]
    NotFound(String),
    /// Timer cannot start because the reservation is no longer waiting.
    #[error("reservation {id} is {status}, not waiting")]
    NotWaiting {
        /// Reservation id.
        id: String,
        /// Status observed at lookup time.
        status: ReservationStatus,
    },
    /// Configuration was rejected.
    #[error("config invalid: {0}")]
    Config(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
