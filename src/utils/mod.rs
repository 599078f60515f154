//! Shared utilities
//!
//! Cross-cutting helpers used by every layer of the gateway.

pub mod crypto;
pub mod error;
