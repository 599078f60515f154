//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use tracing::{info, warn};

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with automatic configuration loading
///
/// Reads `GATEWAY_CONFIG` (default `config/gateway.yaml`), falling back to
/// environment variables when the file is absent.
pub async fn run_server() -> Result<()> {
    info!("Starting identity gateway");

    let config_path =
        std::env::var("GATEWAY_CONFIG").unwrap_or_else(|_| "config/gateway.yaml".to_string());

    let config = match Config::from_file(&config_path).await {
        Ok(config) => {
            info!("Configuration loaded from {}", config_path);
            config
        }
        Err(e) => {
            warn!(
                "Could not load {} ({}); using environment configuration",
                config_path, e
            );
            Config::from_env()?
        }
    };

    let server = HttpServer::new(&config).await?;
    info!(
        "Server starting at http://{}",
        config.server().address()
    );

    server.start().await
}
