//! Permission entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Permission entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Unique permission identifier
    pub uuid: Uuid,
    /// Permission name, unique per guard
    pub name: String,
    /// Guard namespace honoring this permission
    pub guard: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Permission {
    /// Whether this permission matches a (name, guard) pair
    pub fn matches(&self, name: &str, guard: &str) -> bool {
        self.name == name && self.guard == guard
    }
}
