//! Main gateway configuration

#![allow(missing_docs)]

use super::*;
use serde::{Deserialize, Serialize};

/// Main gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
}

impl GatewayConfig {
    /// Build configuration from environment variables over defaults
    pub fn from_env() -> crate::utils::error::Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("GATEWAY_DATABASE_URL") {
            config.storage.database.url = url;
        }
        if let Ok(secret) = std::env::var("GATEWAY_JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }
        if let Ok(host) = std::env::var("GATEWAY_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("GATEWAY_PORT") {
            config.server.port = port.parse().map_err(|e| {
                crate::utils::error::GatewayError::Config(format!("Invalid GATEWAY_PORT: {}", e))
            })?;
        }
        if let Ok(guard) = std::env::var("GATEWAY_GUARD") {
            config.auth.guard = guard;
        }

        Ok(config)
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.storage = self.storage.merge(other.storage);
        self.auth = self.auth.merge(other.auth);
        self
    }
}
