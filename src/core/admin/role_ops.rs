//! Role management operations

use crate::core::models::{Page, PageRequest, Permission, RoleWithCount};
use crate::storage::database::{NewRole, RoleChanges, RoleFilter};
use crate::utils::error::{GatewayError, Result};
use tracing::info;
use uuid::Uuid;

use super::manager::AdminService;
use super::types::{CreateRoleRequest, UpdateRoleRequest};

impl AdminService {
    /// List roles with permission counts
    pub async fn list_roles(
        &self,
        filter: &RoleFilter,
        page: &PageRequest,
    ) -> Result<Page<RoleWithCount>> {
        self.store.list_roles(filter, page).await
    }

    /// Get a role by UUID with its permission count
    pub async fn get_role(&self, uuid: Uuid) -> Result<RoleWithCount> {
        self.store
            .find_role_with_count(uuid)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("Role not found: {}", uuid)))
    }

    /// Get a role by name within a guard, defaulting to the configured one
    pub async fn get_role_by_name(
        &self,
        name: &str,
        guard: Option<&str>,
    ) -> Result<RoleWithCount> {
        let guard = guard.unwrap_or(&self.guard);
        let role = self
            .store
            .find_role_by_name(name, guard)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("Role not found: {}", name)))?;
        self.store
            .find_role_with_count(role.uuid)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("Role not found: {}", name)))
    }

    /// Create a role with its initial permission assignments
    pub async fn create_role(&self, request: CreateRoleRequest) -> Result<RoleWithCount> {
        Self::validate_grant_name(&request.name)?;
        let guard = request.guard.unwrap_or_else(|| self.guard.clone());

        if self
            .store
            .find_role_by_name(&request.name, &guard)
            .await?
            .is_some()
        {
            return Err(GatewayError::duplicate_key(format!(
                "Role already exists: {}",
                request.name
            )));
        }

        let role = self
            .store
            .create_role(
                NewRole {
                    name: request.name,
                    guard,
                },
                &request.permission_uuids,
            )
            .await?;

        info!("Created role: {} ({})", role.role.name, role.role.uuid);
        Ok(role)
    }

    /// Update a role
    pub async fn update_role(
        &self,
        uuid: Uuid,
        request: UpdateRoleRequest,
    ) -> Result<RoleWithCount> {
        let current = self.get_role(uuid).await?;

        if let Some(name) = &request.name {
            Self::validate_grant_name(name)?;
            if *name != current.role.name
                && self
                    .store
                    .find_role_by_name(name, &current.role.guard)
                    .await?
                    .is_some()
            {
                return Err(GatewayError::duplicate_key(format!(
                    "Role already exists: {}",
                    name
                )));
            }
        }

        let role = self
            .store
            .update_role(
                uuid,
                RoleChanges { name: request.name },
                request.permission_uuids.as_deref(),
            )
            .await?;

        info!("Updated role: {} ({})", role.role.name, role.role.uuid);
        Ok(role)
    }

    /// Delete a role, revoking it from every holder
    pub async fn delete_role(&self, uuid: Uuid) -> Result<()> {
        self.store.delete_role(uuid).await?;
        info!("Deleted role: {}", uuid);
        Ok(())
    }

    /// Replace a role's permission set
    pub async fn sync_role_permissions(
        &self,
        role_uuid: Uuid,
        permission_uuids: &[Uuid],
    ) -> Result<Vec<Permission>> {
        let permissions = self
            .store
            .sync_role_permissions(role_uuid, permission_uuids)
            .await?;
        info!(
            "Synced {} permission(s) for role: {}",
            permissions.len(),
            role_uuid
        );
        Ok(permissions)
    }

    /// Add a single permission to a role
    pub async fn assign_permission_to_role(
        &self,
        role_uuid: Uuid,
        permission_uuid: Uuid,
    ) -> Result<Vec<Permission>> {
        let permissions = self
            .store
            .assign_permission_to_role(role_uuid, permission_uuid)
            .await?;
        info!("Assigned permission {} to role {}", permission_uuid, role_uuid);
        Ok(permissions)
    }

    /// Permissions currently attached to a role
    pub async fn role_permissions(&self, role_uuid: Uuid) -> Result<Vec<Permission>> {
        self.store.role_permissions(role_uuid).await
    }
}
