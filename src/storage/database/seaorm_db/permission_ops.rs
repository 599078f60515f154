use crate::core::models::{Page, PageRequest, Permission, SortDirection, SortField};
use crate::utils::error::{GatewayError, Result};
use chrono::Utc;
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, permission, role_permission};
use super::map_constraint_err;
use super::types::SeaOrmDatabase;

/// Filter for permission listings
#[derive(Debug, Clone, Default)]
pub struct PermissionFilter {
    /// Substring match against the permission name
    pub search: Option<String>,
    /// Restrict to one guard namespace
    pub guard: Option<String>,
}

/// Attributes for a new permission row
#[derive(Debug, Clone)]
pub struct NewPermission {
    pub name: String,
    pub guard: String,
}

/// Column-level changes to an existing permission; `None` leaves a column
/// untouched
#[derive(Debug, Clone, Default)]
pub struct PermissionChanges {
    pub name: Option<String>,
}

impl SeaOrmDatabase {
    /// Find permission by UUID
    pub async fn find_permission_by_uuid(&self, uuid: Uuid) -> Result<Option<Permission>> {
        debug!("Finding permission by UUID: {}", uuid);

        let model = entities::Permission::find_by_id(uuid).one(&self.db).await?;
        Ok(model.map(|m| m.to_domain_permission()))
    }

    /// Find permission by name within a guard namespace
    pub async fn find_permission_by_name(
        &self,
        name: &str,
        guard: &str,
    ) -> Result<Option<Permission>> {
        debug!("Finding permission by name: {} (guard {})", name, guard);

        let model = entities::Permission::find()
            .filter(permission::Column::Name.eq(name))
            .filter(permission::Column::Guard.eq(guard))
            .one(&self.db)
            .await?;

        Ok(model.map(|m| m.to_domain_permission()))
    }

    /// List permissions with deterministic ordering and pagination
    pub async fn list_permissions(
        &self,
        filter: &PermissionFilter,
        page: &PageRequest,
    ) -> Result<Page<Permission>> {
        debug!("Listing permissions: {:?} {:?}", filter, page);

        let mut query = entities::Permission::find();
        if let Some(search) = &filter.search {
            query = query.filter(permission::Column::Name.like(format!("%{}%", search)));
        }
        if let Some(guard) = &filter.guard {
            query = query.filter(permission::Column::Guard.eq(guard));
        }

        let column = match page.sort_by {
            SortField::Uuid => permission::Column::Uuid,
            SortField::Name => permission::Column::Name,
            SortField::CreatedAt => permission::Column::CreatedAt,
        };
        query = match page.sort_direction {
            SortDirection::Asc => query.order_by_asc(column),
            SortDirection::Desc => query.order_by_desc(column),
        };
        query = query.order_by_asc(permission::Column::Uuid);

        let paginator = query.paginate(&self.db, page.per_page);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page_index()).await?;

        Ok(Page {
            items: models
                .iter()
                .map(|model| model.to_domain_permission())
                .collect(),
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Create a permission
    pub async fn create_permission(&self, new_permission: NewPermission) -> Result<Permission> {
        debug!(
            "Creating permission: {} (guard {})",
            new_permission.name, new_permission.guard
        );

        let now = Utc::now();
        let uuid = Uuid::new_v4();
        let model = permission::ActiveModel {
            uuid: Set(uuid),
            name: Set(new_permission.name),
            guard: Set(new_permission.guard),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let model = entities::Permission::insert(model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| map_constraint_err("permission name already taken for this guard", e))?;

        Ok(model.to_domain_permission())
    }

    /// Rename a permission
    ///
    /// Every role holding the permission grants the new name immediately;
    /// the assignment rows reference the UUID and do not change.
    pub async fn update_permission(
        &self,
        uuid: Uuid,
        changes: PermissionChanges,
    ) -> Result<Permission> {
        debug!("Updating permission: {}", uuid);

        let model = entities::Permission::find_by_id(uuid)
            .one(&self.db)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("Permission not found: {}", uuid)))?;

        let mut active: permission::ActiveModel = model.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        active.updated_at = Set(Utc::now().into());

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| map_constraint_err("permission name already taken for this guard", e))?;

        Ok(model.to_domain_permission())
    }

    /// Hard-delete a permission and every assignment row referencing it
    pub async fn delete_permission(&self, uuid: Uuid) -> Result<()> {
        debug!("Deleting permission: {}", uuid);

        let txn = self.db.begin().await?;

        entities::Permission::find_by_id(uuid)
            .one(&txn)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("Permission not found: {}", uuid)))?;

        role_permission::Entity::delete_many()
            .filter(role_permission::Column::PermissionUuid.eq(uuid))
            .exec(&txn)
            .await?;
        entities::Permission::delete_by_id(uuid).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }
}
