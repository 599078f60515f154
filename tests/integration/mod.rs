//! Integration tests
//!
//! Each test builds its own in-memory gateway, so tests are independent
//! and run in parallel.

pub mod authorization_tests;
pub mod lifecycle_tests;
pub mod store_tests;
