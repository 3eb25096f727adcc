//! Tests for builder modules

use laundry_board::builders::StoreBuilder;
use laundry_board::config::BoardConfig;
use laundry_board::core::{AuditAction, InMemoryAuditSink};
use laundry_board::util::ManualClock;
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_store_builder_defaults() {
    let builder = StoreBuilder::new(BoardConfig::default());
    assert_eq!(builder.config().max_loads, 10);

    let store = builder.build().unwrap();
    assert_eq!(store.sweep_policy().interval, Duration::from_secs(30));
    assert_eq!(store.sweep_policy().grace_period, Duration::from_secs(300));
}

#[test]
fn test_store_builder_custom_audit() {
    let sink = InMemoryAuditSink::new(4);
    let store = StoreBuilder::new(BoardConfig::default())
        .with_clock(Arc::new(ManualClock::new(0)))
        .with_audit(Arc::new(sink.clone()))
        .build()
        .unwrap();

    let r = store.enqueue("Alice", 1);
    store.remove(&r.id);

    let actions: Vec<_> = sink.events().iter().map(|e| e.action).collect();
    assert_eq!(actions, vec![AuditAction::Enqueue, AuditAction::Remove]);
}

#[test]
fn test_store_builder_without_audit() {
    let store = StoreBuilder::new(BoardConfig::default())
        .without_audit()
        .build()
        .unwrap();
    assert!(format!("{store:?}").contains("audit: false"));
}
