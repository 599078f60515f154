//! Management service request types

use serde::Deserialize;
use uuid::Uuid;

/// Request to create a user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    /// Display name
    pub name: String,
    /// Login username
    pub username: String,
    /// Email address
    pub email: String,
    /// Phone number (optional)
    #[serde(default)]
    pub phone: Option<String>,
    /// Plaintext password, hashed before storage
    pub password: String,
    /// Initial role assignments
    #[serde(default)]
    pub role_uuids: Vec<Uuid>,
}

/// Request to update a user; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// New plaintext password, hashed before storage
    #[serde(default)]
    pub password: Option<String>,
    /// Full replacement role set; absent leaves assignments untouched
    #[serde(default)]
    pub role_uuids: Option<Vec<Uuid>>,
}

/// Request to create a role
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoleRequest {
    /// Role name, unique within its guard
    pub name: String,
    /// Guard namespace; falls back to the configured default
    #[serde(default)]
    pub guard: Option<String>,
    /// Initial permission assignments
    #[serde(default)]
    pub permission_uuids: Vec<Uuid>,
}

/// Request to update a role; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRoleRequest {
    #[serde(default)]
    pub name: Option<String>,
    /// Full replacement permission set; absent leaves assignments untouched
    #[serde(default)]
    pub permission_uuids: Option<Vec<Uuid>>,
}

/// Request to create a permission
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePermissionRequest {
    /// Permission name, unique within its guard
    pub name: String,
    /// Guard namespace; falls back to the configured default
    #[serde(default)]
    pub guard: Option<String>,
}

/// Request to rename a permission
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePermissionRequest {
    pub name: String,
}
