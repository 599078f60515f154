//! Role entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique role identifier
    pub uuid: Uuid,
    /// Role name, unique per guard
    pub name: String,
    /// Guard namespace honoring this role
    pub guard: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Role with its derived permission count
///
/// The count is computed from the assignment table at read time, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleWithCount {
    /// The role itself
    #[serde(flatten)]
    pub role: Role,
    /// Number of permissions currently attached to the role
    pub total_permissions: u64,
}
