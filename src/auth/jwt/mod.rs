//! JWT token handling
//!
//! This module provides JWT token creation, verification, and management.

mod handler;
pub mod types;
mod utils;

pub use types::{Claims, JwtHandler, TokenPair, TokenType};

#[cfg(test)]
mod tests;
