//! Assembled in-memory gateway for integration tests

use identity_gateway::auth::{AuthSystem, TokenPair};
use identity_gateway::core::admin::AdminService;
use identity_gateway::core::models::User;
use identity_gateway::storage::Database;
use std::sync::Arc;

use super::fixtures;

/// The gateway's service layer wired against an in-memory SQLite store
pub struct TestGateway {
    pub store: Arc<Database>,
    pub auth: AuthSystem,
    pub admin: AdminService,
}

impl TestGateway {
    /// Empty gateway: migrated schema, no seeded data
    pub async fn new() -> Self {
        let config = fixtures::auth_config();
        let store = Arc::new(
            Database::new_in_memory()
                .await
                .expect("in-memory database"),
        );
        let auth = AuthSystem::new(&config, store.clone()).expect("auth system");
        let admin = AdminService::new(store.clone(), config.guard.clone());

        Self { store, auth, admin }
    }

    /// Gateway with bootstrap seeding applied: the 12 operation
    /// permissions, the super-admin role, and an `admin` user
    pub async fn bootstrapped() -> Self {
        let gateway = Self::new().await;
        gateway
            .admin
            .bootstrap(&fixtures::bootstrap_config())
            .await
            .expect("bootstrap");
        gateway
    }

    /// Log in and return the authenticated user with a token pair
    pub async fn login(&self, username: &str, password: &str) -> (User, TokenPair) {
        self.auth
            .login(username, password)
            .await
            .expect("login should succeed")
    }

    /// Log in as the bootstrap admin
    pub async fn login_admin(&self) -> (User, TokenPair) {
        self.login("admin", fixtures::ADMIN_PASSWORD).await
    }
}
