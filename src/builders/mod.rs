//! Builders to construct board components from configuration.

pub mod store_builder;

pub use store_builder::StoreBuilder;
