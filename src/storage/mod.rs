//! Storage layer
//!
//! The identity store is the only component that owns persisted rows; every
//! other component reads through it.

pub mod database;

pub use database::Database;
