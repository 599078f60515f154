//! Management service - main facade

use crate::storage::Database;
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;

/// Management service for users, roles, and permissions
///
/// Validates and normalizes requests, hashes credentials, and delegates
/// persistence to the identity store. Pre-checks give friendly duplicate
/// errors; the schema's unique constraints remain the enforcement point
/// under concurrency.
#[derive(Debug, Clone)]
pub struct AdminService {
    /// Identity store
    pub(super) store: Arc<Database>,
    /// Default guard namespace for new roles and permissions
    pub(super) guard: String,
}

impl AdminService {
    /// Create a new management service
    pub fn new(store: Arc<Database>, guard: String) -> Self {
        Self { store, guard }
    }

    /// Get identity store
    pub fn store(&self) -> &Arc<Database> {
        &self.store
    }

    /// Default guard namespace
    pub fn guard(&self) -> &str {
        &self.guard
    }

    pub(super) fn validate_display_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(GatewayError::validation("Name cannot be empty"));
        }
        if name.len() > 255 {
            return Err(GatewayError::validation("Name exceeds 255 characters"));
        }
        Ok(())
    }

    pub(super) fn validate_username(username: &str) -> Result<()> {
        if username.trim().is_empty() {
            return Err(GatewayError::validation("Username cannot be empty"));
        }
        if username.len() > 255 {
            return Err(GatewayError::validation("Username exceeds 255 characters"));
        }
        if username.contains(char::is_whitespace) {
            return Err(GatewayError::validation("Username cannot contain whitespace"));
        }
        Ok(())
    }

    pub(super) fn validate_email(email: &str) -> Result<()> {
        let valid = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
            }
            None => false,
        };
        if !valid {
            return Err(GatewayError::validation(format!(
                "Invalid email address: {}",
                email
            )));
        }
        Ok(())
    }

    pub(super) fn validate_password(password: &str) -> Result<()> {
        if password.len() < 8 {
            return Err(GatewayError::validation(
                "Password must be at least 8 characters long",
            ));
        }
        Ok(())
    }

    /// Role and permission names are lowercase kebab-case identifiers
    pub(super) fn validate_grant_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(GatewayError::validation("Name cannot be empty"));
        }
        if name.len() > 255 {
            return Err(GatewayError::validation("Name exceeds 255 characters"));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(GatewayError::validation(format!(
                "Invalid name: {} (lowercase letters, digits, '-' and '_' only)",
                name
            )));
        }
        Ok(())
    }
}
