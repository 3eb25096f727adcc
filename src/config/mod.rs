//! Configuration for the board and its sweep.

pub mod board;

pub use board::{BoardConfig, ENV_PREFIX};
