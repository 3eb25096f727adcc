//! # Laundry Board
//!
//! An in-memory reservation board for one shared laundry machine.
//!
//! People claim a place in line or start the machine right away, run a timer,
//! and have their slot expire and clear itself. The heart of the crate is the
//! [`ReservationStore`](core::ReservationStore): an ordered, reader/writer-locked
//! collection of time-bound reservations with a status lifecycle
//! (waiting, in progress, completed, evicted) and a background sweep that
//! advances that lifecycle without any client involvement.
//!
//! ## Key Features
//!
//! - **Single writer for expiry**: only the sweep moves a timer to completed;
//!   queries compute remaining time without writing anything back
//! - **Copy-out reads**: every query returns owned data, never a live reference
//! - **Owned sweeper**: the sweep task is spawned with the store and stops
//!   once the store is dropped
//! - **Injectable clock**: expiry and eviction are testable without sleeping
//! - **Validating service layer**: [`BoardService`](runtime::BoardService)
//!   applies the add/start rules and builds render-ready views
//!
//! ## Usage
//!
//! ```rust,ignore
//! use laundry_board::builders::StoreBuilder;
//! use laundry_board::config::BoardConfig;
//! use laundry_board::runtime::{AddRequest, BoardService, TokioSpawner};
//!
//! let config = BoardConfig::from_env()?;
//! let store = StoreBuilder::new(config.clone()).spawn(&TokioSpawner::current())?;
//! let board = BoardService::new(store, &config);
//!
//! let alice = board.add(AddRequest {
//!     name: "Alice".into(),
//!     loads: 2,
//!     duration_minutes: Some(45),
//! })?;
//! let view = board.view();
//! ```
//!
//! For complete scenarios see `tests/store_lifecycle_test.rs`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Reservation records, the shared store, and the background sweep.
pub mod core;
/// Configuration for the board and its sweep.
pub mod config;
/// Builders to construct the store from configuration.
pub mod builders;
/// Runtime adapters and the caller-facing service.
pub mod runtime;
/// Shared utilities.
pub mod util;
