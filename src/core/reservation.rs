//! Reservation records and their derived timer state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::reservation_id;

/// Milliseconds in one minute.
pub const MS_PER_MINUTE: u128 = 60_000;

/// Lifecycle status of a reservation.
///
/// Transitions only move forward: `Waiting -> InProgress -> Completed`, after
/// which the record is evicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Queued, timer not started.
    Waiting,
    /// Machine is running for this holder.
    InProgress,
    /// Timer ran out; kept visible until the grace period passes.
    Completed,
}

impl ReservationStatus {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One person's claim on the machine.
///
/// `start_time_ms` and `duration_minutes` are set once the timer starts and
/// stay set through completion; `completed_at_ms` is set only when completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Opaque unique identifier.
    pub id: String,
    /// Holder name.
    pub name: String,
    /// Current lifecycle status.
    pub status: ReservationStatus,
    /// Timer start (ms since epoch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time_ms: Option<u128>,
    /// Timer length in whole minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// Number of loads to wash.
    pub loads: u32,
    /// Completion stamp (ms since epoch), written by the sweep.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at_ms: Option<u128>,
    /// Enqueue time (ms since epoch).
    pub queued_at_ms: u128,
}

impl Reservation {
    /// New reservation waiting in line.
    #[must_use]
    pub fn waiting(name: impl Into<String>, loads: u32, now_ms: u128) -> Self {
        Self {
            id: reservation_id(now_ms),
            name: name.into(),
            status: ReservationStatus::Waiting,
            start_time_ms: None,
            duration_minutes: None,
            loads,
            completed_at_ms: None,
            queued_at_ms: now_ms,
        }
    }

    /// New reservation whose timer starts immediately.
    #[must_use]
    pub fn started(name: impl Into<String>, duration_minutes: u32, loads: u32, now_ms: u128) -> Self {
        let mut reservation = Self::waiting(name, loads, now_ms);
        reservation.begin(duration_minutes, now_ms);
        reservation
    }

    /// Waiting -> InProgress. Returns false and leaves the record untouched
    /// for any other status.
    pub(crate) fn begin(&mut self, duration_minutes: u32, now_ms: u128) -> bool {
        if self.status != ReservationStatus::Waiting {
            return false;
        }
        self.start_time_ms = Some(now_ms);
        self.duration_minutes = Some(duration_minutes);
        self.status = ReservationStatus::InProgress;
        true
    }

    /// InProgress -> Completed, stamping the completion time once.
    pub(crate) fn complete(&mut self, now_ms: u128) -> bool {
        if self.status != ReservationStatus::InProgress {
            return false;
        }
        self.status = ReservationStatus::Completed;
        self.completed_at_ms = Some(now_ms);
        true
    }

    /// When the timer runs out, if it has been started.
    #[must_use]
    pub fn end_time_ms(&self) -> Option<u128> {
        let start = self.start_time_ms?;
        let minutes = self.duration_minutes?;
        Some(start + u128::from(minutes) * MS_PER_MINUTE)
    }

    /// Whole minutes left on a running timer, rounded up.
    ///
    /// Zero for anything not in progress, and never zero before the deadline.
    #[must_use]
    pub fn remaining_minutes(&self, now_ms: u128) -> u32 {
        if self.status != ReservationStatus::InProgress {
            return 0;
        }
        let Some(end) = self.end_time_ms() else {
            return 0;
        };
        let remaining_ms = end.saturating_sub(now_ms);
        u32::try_from(remaining_ms.div_ceil(MS_PER_MINUTE)).unwrap_or(u32::MAX)
    }

    /// True once an in-progress timer has reached its deadline.
    ///
    /// A record missing its start or duration is never reported expired.
    #[must_use]
    pub fn is_expired(&self, now_ms: u128) -> bool {
        self.status == ReservationStatus::InProgress
            && self.end_time_ms().is_some()
            && self.remaining_minutes(now_ms) == 0
    }

    /// True while the machine is running for this holder.
    #[must_use]
    pub fn is_active(&self, now_ms: u128) -> bool {
        self.status == ReservationStatus::InProgress && self.remaining_minutes(now_ms) > 0
    }

    /// True for anything still holding or waiting for the machine.
    #[must_use]
    pub fn is_queued(&self, now_ms: u128) -> bool {
        self.status == ReservationStatus::Waiting || self.is_active(now_ms)
    }

    /// True once a completed record has outlived the grace period.
    #[must_use]
    pub fn should_evict(&self, now_ms: u128, grace_period_ms: u128) -> bool {
        if self.status != ReservationStatus::Completed {
            return false;
        }
        self.completed_at_ms
            .is_some_and(|done| now_ms.saturating_sub(done) > grace_period_ms)
    }
}
