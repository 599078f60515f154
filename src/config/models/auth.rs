//! Authentication configuration

use super::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT secret
    pub jwt_secret: String,
    /// JWT access token expiration in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration: u64,
    /// Guard namespace authorization checks run against
    #[serde(default = "default_guard")]
    pub guard: String,
    /// Bootstrap seeding configuration
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: crate::utils::crypto::generate_jwt_secret(),
            jwt_expiration: default_jwt_expiration(),
            guard: default_guard(),
            bootstrap: BootstrapConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Merge auth configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.jwt_secret.is_empty() {
            self.jwt_secret = other.jwt_secret;
        }
        if other.jwt_expiration != default_jwt_expiration() {
            self.jwt_expiration = other.jwt_expiration;
        }
        if other.guard != default_guard() {
            self.guard = other.guard;
        }
        self.bootstrap = self.bootstrap.merge(other.bootstrap);
        self
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long for security".to_string());
        }

        if self.jwt_secret == "your-secret-key" || self.jwt_secret == "change-me" {
            return Err(
                "JWT secret must not use default values. Please generate a secure random secret."
                    .to_string(),
            );
        }

        if self.jwt_expiration < 300 {
            return Err("JWT expiration should be at least 5 minutes (300 seconds)".to_string());
        }

        if self.jwt_expiration > 86400 * 30 {
            return Err(
                "JWT expiration should not exceed 30 days for security reasons".to_string(),
            );
        }

        if self.guard.is_empty() {
            return Err("Guard name cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Bootstrap seeding configuration
///
/// When enabled, startup ensures the operation permissions and a
/// `super-admin` role holding all of them exist, and creates an initial
/// admin user if the user table is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Enable seeding on startup
    #[serde(default)]
    pub enabled: bool,
    /// Initial admin username
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    /// Initial admin email
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    /// Initial admin password; seeding skips user creation when unset
    pub admin_password: Option<String>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            admin_username: default_admin_username(),
            admin_email: default_admin_email(),
            admin_password: None,
        }
    }
}

impl BootstrapConfig {
    /// Merge bootstrap configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.enabled {
            self.enabled = other.enabled;
        }
        if other.admin_username != default_admin_username() {
            self.admin_username = other.admin_username;
        }
        if other.admin_email != default_admin_email() {
            self.admin_email = other.admin_email;
        }
        if other.admin_password.is_some() {
            self.admin_password = other.admin_password;
        }
        self
    }
}

/// Warn about insecure auth configuration without failing startup
pub fn warn_insecure_config(config: &AuthConfig) {
    if let Some(password) = &config.bootstrap.admin_password {
        if password.len() < 8 {
            warn!("Bootstrap admin password is shorter than 8 characters");
        }
    }
}
