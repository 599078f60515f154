//! Authorization engine core functionality

use crate::core::models::Permission;
use crate::storage::Database;
use crate::utils::error::Result;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::types::PermissionCheck;

/// Authorization engine resolving effective permissions through roles
///
/// Every check reads the live assignment tables. There is no wildcard and
/// no role-name bypass: a user holds exactly the permissions its roles
/// grant, administrators included.
#[derive(Debug, Clone)]
pub struct AuthorizationEngine {
    /// Identity store
    pub(super) store: Arc<Database>,
    /// Guard namespace checks run against
    pub(super) guard: String,
}

impl AuthorizationEngine {
    /// Create a new authorization engine
    pub fn new(store: Arc<Database>, guard: String) -> Self {
        Self { store, guard }
    }

    /// Guard namespace this engine checks against
    pub fn guard(&self) -> &str {
        &self.guard
    }

    /// Effective permissions of a user, deduplicated across roles
    pub async fn effective_permissions(&self, user_uuid: Uuid) -> Result<Vec<Permission>> {
        let permissions = self.store.permissions_for_user(user_uuid).await?;

        Ok(permissions
            .into_iter()
            .filter(|p| p.guard == self.guard)
            .collect())
    }

    /// Whether a user holds a permission by name
    pub async fn has_permission(&self, user_uuid: Uuid, permission_name: &str) -> Result<bool> {
        let permissions = self.store.permissions_for_user(user_uuid).await?;
        let granted = permissions
            .iter()
            .any(|p| p.matches(permission_name, &self.guard));

        debug!(
            "Permission check: user={} permission={} granted={}",
            user_uuid, permission_name, granted
        );
        Ok(granted)
    }

    /// Detailed permission check naming the granting roles
    pub async fn check_permission_detailed(
        &self,
        user_uuid: Uuid,
        permission_name: &str,
    ) -> Result<PermissionCheck> {
        let Some(permission) = self
            .store
            .find_permission_by_name(permission_name, &self.guard)
            .await?
        else {
            return Ok(PermissionCheck {
                granted: false,
                granted_by_roles: vec![],
                denial_reason: Some(format!("Unknown permission: {}", permission_name)),
            });
        };

        let user_roles = self.store.user_roles(user_uuid).await?;
        let granting = self.store.roles_with_permission(permission.uuid).await?;
        let user_role_uuids: HashSet<Uuid> = user_roles.iter().map(|r| r.uuid).collect();

        let granted_by_roles: Vec<String> = granting
            .into_iter()
            .filter(|role| user_role_uuids.contains(&role.uuid))
            .map(|role| role.name)
            .collect();

        if granted_by_roles.is_empty() {
            Ok(PermissionCheck {
                granted: false,
                granted_by_roles: vec![],
                denial_reason: Some(format!("Missing permission: {}", permission_name)),
            })
        } else {
            Ok(PermissionCheck {
                granted: true,
                granted_by_roles,
                denial_reason: None,
            })
        }
    }
}
