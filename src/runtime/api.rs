//! Caller-facing board service: request validation, add/start policy, and
//! view models for rendering the queue.
//!
//! This is the layer an HTTP or template front end sits on. It validates input
//! before touching the store and turns the store's `bool`/`Option` outcomes
//! into [`BoardError`]s.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::BoardConfig;
use crate::core::{BoardError, Reservation, ReservationStatus, ReservationStore};

/// Request to join the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddRequest {
    /// Holder name.
    pub name: String,
    /// Number of loads.
    pub loads: u32,
    /// Timer length to use if the machine is free right now.
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

/// Reservation plus the values a view needs to render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationView {
    /// Underlying record.
    pub reservation: Reservation,
    /// Place in line for waiting reservations.
    pub position: Option<usize>,
    /// Minutes left on a running timer.
    pub remaining_minutes: u32,
    /// When the timer runs out, once started.
    pub end_time_ms: Option<u128>,
    /// Timer length, e.g. `1h 30m`.
    pub duration_label: Option<String>,
    /// Remaining time, e.g. `12 min remaining` or `Complete`.
    pub remaining_label: Option<String>,
}

/// Whole-board view computed from a single snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueView {
    /// Reservations in queue order.
    pub items: Vec<ReservationView>,
    /// Someone's timer is running.
    pub has_active_load: bool,
    /// Someone is waiting or running.
    pub has_queue_items: bool,
}

/// What the add form needs to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    /// New arrivals join the line instead of starting.
    pub has_queue_items: bool,
    /// The machine is running.
    pub has_active_load: bool,
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
    /// Reservations currently held.
    pub reservations: usize,
}

/// Validating front door to a shared [`ReservationStore`].
#[derive(Debug, Clone)]
pub struct BoardService {
    store: Arc<ReservationStore>,
    min_loads: u32,
    max_loads: u32,
}

impl BoardService {
    /// Wrap a store using the load bounds from `config`.
    #[must_use]
    pub fn new(store: Arc<ReservationStore>, config: &BoardConfig) -> Self {
        Self {
            store,
            min_loads: config.min_loads,
            max_loads: config.max_loads,
        }
    }

    /// Underlying store.
    #[must_use]
    pub const fn store(&self) -> &Arc<ReservationStore> {
        &self.store
    }

    /// Add someone to the board.
    ///
    /// With a duration and an idle board the timer starts immediately;
    /// otherwise the reservation waits in line.
    pub fn add(&self, req: AddRequest) -> Result<Reservation, BoardError> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(BoardError::EmptyName);
        }
        if !(self.min_loads..=self.max_loads).contains(&req.loads) {
            return Err(self.invalid_loads(req.loads.to_string()));
        }
        if req.duration_minutes == Some(0) {
            return Err(BoardError::InvalidDuration("0".into()));
        }
        Ok(self
            .store
            .enqueue_or_start(name, req.duration_minutes, req.loads))
    }

    /// Add from raw form fields. An empty duration means "just queue".
    pub fn add_form(&self, name: &str, loads: &str, duration: &str) -> Result<Reservation, BoardError> {
        let loads = loads.trim();
        if name.trim().is_empty() {
            return Err(BoardError::EmptyName);
        }
        if loads.is_empty() {
            return Err(BoardError::MissingLoads);
        }
        let loads = loads
            .parse::<u32>()
            .map_err(|_| self.invalid_loads(loads.to_string()))?;
        let duration_minutes = if duration.trim().is_empty() {
            None
        } else {
            Some(parse_duration(duration)?)
        };
        self.add(AddRequest {
            name: name.to_string(),
            loads,
            duration_minutes,
        })
    }

    /// Start the timer for a waiting reservation.
    pub fn start(&self, id: &str, duration_minutes: u32) -> Result<Reservation, BoardError> {
        if id.is_empty() {
            return Err(BoardError::MissingId);
        }
        if duration_minutes == 0 {
            return Err(BoardError::InvalidDuration("0".into()));
        }
        if self.store.start_timer(id, duration_minutes) {
            return self
                .store
                .get(id)
                .ok_or_else(|| BoardError::NotFound(id.to_string()));
        }
        Err(self.refusal(id))
    }

    /// Start from a raw duration field.
    pub fn start_form(&self, id: &str, duration: &str) -> Result<Reservation, BoardError> {
        self.start(id, parse_duration(duration)?)
    }

    /// Take a reservation off the board.
    pub fn remove(&self, id: &str) -> Result<(), BoardError> {
        if id.is_empty() {
            return Err(BoardError::MissingId);
        }
        if self.store.remove(id) {
            Ok(())
        } else {
            Err(BoardError::NotFound(id.to_string()))
        }
    }

    /// Place in line of a waiting reservation.
    pub fn position(&self, id: &str) -> Result<usize, BoardError> {
        self.store
            .position_of(id)
            .ok_or_else(|| self.refusal(id))
    }

    /// Render-ready view of the whole board.
    #[must_use]
    pub fn view(&self) -> QueueView {
        let now = self.store.now_ms();
        let items = self
            .store
            .snapshot_with_positions()
            .into_iter()
            .map(|(reservation, position)| {
                let remaining_minutes = reservation.remaining_minutes(now);
                let remaining = match reservation.status {
                    ReservationStatus::Waiting => None,
                    ReservationStatus::InProgress | ReservationStatus::Completed => {
                        Some(remaining_label(remaining_minutes))
                    }
                };
                ReservationView {
                    position,
                    remaining_minutes,
                    end_time_ms: reservation.end_time_ms(),
                    duration_label: reservation.duration_minutes.map(format_duration),
                    remaining_label: remaining,
                    reservation,
                }
            })
            .collect::<Vec<_>>();
        let has_active_load = items.iter().any(|v| v.reservation.is_active(now));
        let has_queue_items = items.iter().any(|v| v.reservation.is_queued(now));
        QueueView {
            items,
            has_active_load,
            has_queue_items,
        }
    }

    /// State for the add form.
    #[must_use]
    pub fn form_state(&self) -> FormState {
        FormState {
            has_queue_items: self.store.has_any_queue_items(),
            has_active_load: self.store.has_active_load(),
        }
    }

    /// Return a health payload.
    #[must_use]
    pub fn health(&self) -> Health {
        Health {
            ok: true,
            reservations: self.store.len(),
        }
    }

    fn invalid_loads(&self, value: String) -> BoardError {
        BoardError::InvalidLoads {
            value,
            min: self.min_loads,
            max: self.max_loads,
        }
    }

    fn refusal(&self, id: &str) -> BoardError {
        match self.store.get(id) {
            Some(r) => BoardError::NotWaiting {
                id: r.id,
                status: r.status,
            },
            None => BoardError::NotFound(id.to_string()),
        }
    }
}

/// Parse a positive whole-minute duration.
pub fn parse_duration(raw: &str) -> Result<u32, BoardError> {
    match raw.trim().parse::<u32>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(BoardError::InvalidDuration(raw.trim().to_string())),
    }
}

/// Human form of a minute count: `45 min`, `1h 30m`, `2h`.
#[must_use]
pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{minutes} min");
    }
    let (hours, mins) = (minutes / 60, minutes % 60);
    if mins > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{hours}h")
    }
}

/// Remaining-time label; `Complete` once nothing is left.
#[must_use]
pub fn remaining_label(minutes: u32) -> String {
    if minutes == 0 {
        "Complete".to_string()
    } else {
        format!("{} remaining", format_duration(minutes))
    }
}
