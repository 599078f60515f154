//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

#![allow(missing_docs)]

pub mod auth;
pub mod gateway;
pub mod server;
pub mod storage;

// Re-export all configuration types
pub use auth::*;
pub use gateway::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

pub fn default_max_connections() -> u32 {
    10
}

pub fn default_connection_timeout() -> u64 {
    5
}

pub fn default_jwt_expiration() -> u64 {
    86400 // 24 hours
}

pub fn default_guard() -> String {
    "api".to_string()
}

pub fn default_database_url() -> String {
    "sqlite://data/gateway.db?mode=rwc".to_string()
}

pub fn default_admin_username() -> String {
    "superadmin".to_string()
}

pub fn default_admin_email() -> String {
    "superadmin@example.com".to_string()
}
