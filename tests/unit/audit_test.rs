//! Tests for audit sink

use laundry_board::core::{build_audit_event, AuditAction, AuditSink, InMemoryAuditSink};

#[test]
fn test_in_memory_audit_sink() {
    let sink = InMemoryAuditSink::new(10);

    sink.record(build_audit_event("r1", "Alice", AuditAction::Enqueue, 5));
    assert_eq!(sink.events().len(), 1);

    let events = sink.events();
    assert_eq!(events[0].reservation_id, "r1");
    assert_eq!(events[0].name, "Alice");
    assert_eq!(events[0].action, AuditAction::Enqueue);
    assert_eq!(events[0].created_at_ms, 5);
}

#[test]
fn test_audit_sink_overflow() {
    let sink = InMemoryAuditSink::new(2);

    sink.record(build_audit_event("r1", "Alice", AuditAction::Enqueue, 1));
    sink.record(build_audit_event("r2", "Bob", AuditAction::Enqueue, 2));
    sink.record(build_audit_event("r3", "Cara", AuditAction::Enqueue, 3));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].reservation_id, "r2"); // First one popped
    assert_eq!(events[1].reservation_id, "r3");
}

#[test]
fn test_clones_share_buffer() {
    let sink = InMemoryAuditSink::new(8);
    let reader = sink.clone();

    sink.record(build_audit_event("r1", "Alice", AuditAction::Start, 1));
    sink.record(build_audit_event("r2", "Bob", AuditAction::Remove, 2));

    assert_eq!(reader.events().len(), 2);
    assert_eq!(reader.events_for("r2")[0].action, AuditAction::Remove);
}

#[test]
fn test_zero_capacity_records_nothing() {
    let sink = InMemoryAuditSink::new(0);
    sink.record(build_audit_event("r1", "Alice", AuditAction::Evict, 1));
    assert!(sink.events().is_empty());
}

#[test]
fn test_action_display() {
    assert_eq!(AuditAction::Complete.to_string(), "complete");
    assert_eq!(AuditAction::Evict.to_string(), "evict");
}
