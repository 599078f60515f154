//! Core functionality
//!
//! Domain models and the management service.

pub mod admin;
pub mod models;
