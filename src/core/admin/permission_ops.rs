//! Permission management operations

use crate::core::models::{Page, PageRequest, Permission, Role};
use crate::storage::database::{NewPermission, PermissionChanges, PermissionFilter};
use crate::utils::error::{GatewayError, Result};
use tracing::info;
use uuid::Uuid;

use super::manager::AdminService;
use super::types::{CreatePermissionRequest, UpdatePermissionRequest};

impl AdminService {
    /// List permissions
    pub async fn list_permissions(
        &self,
        filter: &PermissionFilter,
        page: &PageRequest,
    ) -> Result<Page<Permission>> {
        self.store.list_permissions(filter, page).await
    }

    /// Get a permission by UUID
    pub async fn get_permission(&self, uuid: Uuid) -> Result<Permission> {
        self.store
            .find_permission_by_uuid(uuid)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("Permission not found: {}", uuid)))
    }

    /// Get a permission by name within a guard, defaulting to the
    /// configured one
    pub async fn get_permission_by_name(
        &self,
        name: &str,
        guard: Option<&str>,
    ) -> Result<Permission> {
        let guard = guard.unwrap_or(&self.guard);
        self.store
            .find_permission_by_name(name, guard)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("Permission not found: {}", name)))
    }

    /// Create a permission
    pub async fn create_permission(&self, request: CreatePermissionRequest) -> Result<Permission> {
        Self::validate_grant_name(&request.name)?;
        let guard = request.guard.unwrap_or_else(|| self.guard.clone());

        if self
            .store
            .find_permission_by_name(&request.name, &guard)
            .await?
            .is_some()
        {
            return Err(GatewayError::duplicate_key(format!(
                "Permission already exists: {}",
                request.name
            )));
        }

        let permission = self
            .store
            .create_permission(NewPermission {
                name: request.name,
                guard,
            })
            .await?;

        info!(
            "Created permission: {} ({})",
            permission.name, permission.uuid
        );
        Ok(permission)
    }

    /// Rename a permission
    ///
    /// Roles keep their link rows, so holders grant the new name as soon
    /// as the rename commits.
    pub async fn update_permission(
        &self,
        uuid: Uuid,
        request: UpdatePermissionRequest,
    ) -> Result<Permission> {
        Self::validate_grant_name(&request.name)?;

        let current = self.get_permission(uuid).await?;
        if request.name != current.name
            && self
                .store
                .find_permission_by_name(&request.name, &current.guard)
                .await?
                .is_some()
        {
            return Err(GatewayError::duplicate_key(format!(
                "Permission already exists: {}",
                request.name
            )));
        }

        let permission = self
            .store
            .update_permission(
                uuid,
                PermissionChanges {
                    name: Some(request.name),
                },
            )
            .await?;

        info!(
            "Renamed permission: {} ({})",
            permission.name, permission.uuid
        );
        Ok(permission)
    }

    /// Delete a permission, revoking it from every role
    pub async fn delete_permission(&self, uuid: Uuid) -> Result<()> {
        self.store.delete_permission(uuid).await?;
        info!("Deleted permission: {}", uuid);
        Ok(())
    }

    /// Roles currently granting a permission
    pub async fn roles_with_permission(&self, permission_uuid: Uuid) -> Result<Vec<Role>> {
        self.store.roles_with_permission(permission_uuid).await
    }
}
