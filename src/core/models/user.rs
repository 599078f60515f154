//! User entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity
///
/// Carries the UUIDs of its directly assigned roles; the effective
/// permission set is derived from those by the authorization engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub uuid: Uuid,
    /// Display name
    pub name: String,
    /// Username (unique)
    pub username: String,
    /// Email address (unique)
    pub email: String,
    /// Phone number
    pub phone: Option<String>,
    /// Password hash (opaque to everything but the crypto module)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// UUIDs of directly assigned roles
    pub role_uuids: Vec<Uuid>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Whether the user has been soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
