//! Reservation identifier generation.

use uuid::Uuid;

/// Build an opaque reservation id from the creation instant and a random nonce.
///
/// The nonce keeps ids unique when several reservations are created within
/// the same millisecond.
#[must_use]
pub fn reservation_id(created_at_ms: u128) -> String {
    format!("{created_at_ms}-{}", Uuid::new_v4().simple())
}
