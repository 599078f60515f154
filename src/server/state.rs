//! Application state shared across HTTP handlers

use crate::auth::AuthSystem;
use crate::config::Config;
use crate::core::admin::AdminService;
use crate::storage::Database;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for efficient sharing across threads.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Authentication system
    pub auth: Arc<AuthSystem>,
    /// Management service
    pub admin: Arc<AdminService>,
    /// Identity store
    pub storage: Arc<Database>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(
        config: Config,
        auth: AuthSystem,
        admin: AdminService,
        storage: Arc<Database>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            admin: Arc::new(admin),
            storage,
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
