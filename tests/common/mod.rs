//! Common test utilities
//!
//! Provides an assembled in-memory gateway (store + auth + admin) and
//! request factories so integration tests read as scenarios rather than
//! setup code.

pub mod fixtures;
pub mod gateway;

pub use gateway::TestGateway;

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err and return the error
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
