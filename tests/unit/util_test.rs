//! Tests for utility functions

use laundry_board::util::{now_ms, reservation_id, Clock, ManualClock, SystemClock};
use std::time::Duration;

#[test]
fn test_manual_clock() {
    let clock = ManualClock::new(10);
    clock.advance(Duration::from_secs(1));
    assert_eq!(clock.now_ms(), 1_010);
}

#[test]
fn test_system_clock_tracks_now() {
    let before = now_ms();
    let reading = SystemClock.now_ms();
    assert!(reading >= before);
}

#[test]
fn test_reservation_id_prefix() {
    let id = reservation_id(1234);
    assert!(id.starts_with("1234-"));
    assert_ne!(id, reservation_id(1234));
}

#[test]
fn test_init_tracing_is_idempotent() {
    laundry_board::util::init_tracing();
    laundry_board::util::init_tracing_with_default("debug");
    tracing::info!("tracing initialized twice without panicking");
}

#[test]
fn test_frozen_clock_starts_near_now() {
    let before = now_ms();
    let clock = ManualClock::now_frozen();
    assert!(clock.now_ms() >= before);
}
