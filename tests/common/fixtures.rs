//! Request factories for integration tests

use identity_gateway::config::{AuthConfig, BootstrapConfig};
use identity_gateway::core::admin::{
    CreatePermissionRequest, CreateRoleRequest, CreateUserRequest,
};
use uuid::Uuid;

/// Password every fixture user is created with
pub const TEST_PASSWORD: &str = "fixture-password-1";

/// Bootstrap admin password used by [`bootstrap_config`]
pub const ADMIN_PASSWORD: &str = "bootstrap-admin-pw";

/// Auth configuration pointing at the `api` guard
pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration_test_secret_with_32_plus_chars".to_string(),
        jwt_expiration: 3600,
        guard: "api".to_string(),
        bootstrap: BootstrapConfig::default(),
    }
}

/// Bootstrap configuration that seeds an admin user
pub fn bootstrap_config() -> BootstrapConfig {
    BootstrapConfig {
        enabled: true,
        admin_username: "admin".to_string(),
        admin_email: "admin@example.com".to_string(),
        admin_password: Some(ADMIN_PASSWORD.to_string()),
    }
}

/// A valid create-user request with the given username and roles
pub fn user_request(username: &str, role_uuids: Vec<Uuid>) -> CreateUserRequest {
    CreateUserRequest {
        name: format!("User {}", username),
        username: username.to_string(),
        email: format!("{}@example.com", username),
        phone: None,
        password: TEST_PASSWORD.to_string(),
        role_uuids,
    }
}

/// A valid create-role request in the default guard
pub fn role_request(name: &str, permission_uuids: Vec<Uuid>) -> CreateRoleRequest {
    CreateRoleRequest {
        name: name.to_string(),
        guard: None,
        permission_uuids,
    }
}

/// A valid create-permission request in the default guard
pub fn permission_request(name: &str) -> CreatePermissionRequest {
    CreatePermissionRequest {
        name: name.to_string(),
        guard: None,
    }
}
