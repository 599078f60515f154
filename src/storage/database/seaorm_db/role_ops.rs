use crate::core::models::{Page, PageRequest, Permission, Role, RoleWithCount, SortDirection, SortField};
use crate::utils::error::{GatewayError, Result};
use chrono::Utc;
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, role, role_permission, user_role};
use super::map_constraint_err;
use super::types::SeaOrmDatabase;

/// Filter for role listings
#[derive(Debug, Clone, Default)]
pub struct RoleFilter {
    /// Substring match against the role name
    pub search: Option<String>,
    /// Restrict to one guard namespace
    pub guard: Option<String>,
}

/// Attributes for a new role row
#[derive(Debug, Clone)]
pub struct NewRole {
    pub name: String,
    pub guard: String,
}

/// Column-level changes to an existing role; `None` leaves a column untouched
#[derive(Debug, Clone, Default)]
pub struct RoleChanges {
    pub name: Option<String>,
}

impl SeaOrmDatabase {
    /// Find role by UUID
    pub async fn find_role_by_uuid(&self, uuid: Uuid) -> Result<Option<Role>> {
        debug!("Finding role by UUID: {}", uuid);

        let model = entities::Role::find_by_id(uuid).one(&self.db).await?;
        Ok(model.map(|m| m.to_domain_role()))
    }

    /// Find role by name within a guard namespace
    pub async fn find_role_by_name(&self, name: &str, guard: &str) -> Result<Option<Role>> {
        debug!("Finding role by name: {} (guard {})", name, guard);

        let model = entities::Role::find()
            .filter(role::Column::Name.eq(name))
            .filter(role::Column::Guard.eq(guard))
            .one(&self.db)
            .await?;

        Ok(model.map(|m| m.to_domain_role()))
    }

    /// Find role by UUID together with its derived permission count
    pub async fn find_role_with_count(&self, uuid: Uuid) -> Result<Option<RoleWithCount>> {
        let txn = self.db.begin().await?;

        let Some(model) = entities::Role::find_by_id(uuid).one(&txn).await? else {
            txn.commit().await?;
            return Ok(None);
        };

        let total_permissions = role_permission::Entity::find()
            .filter(role_permission::Column::RoleUuid.eq(uuid))
            .count(&txn)
            .await?;
        txn.commit().await?;

        Ok(Some(RoleWithCount {
            role: model.to_domain_role(),
            total_permissions,
        }))
    }

    /// List roles with derived permission counts
    pub async fn list_roles(
        &self,
        filter: &RoleFilter,
        page: &PageRequest,
    ) -> Result<Page<RoleWithCount>> {
        debug!("Listing roles: {:?} {:?}", filter, page);

        let txn = self.db.begin().await?;

        let mut query = entities::Role::find();
        if let Some(search) = &filter.search {
            query = query.filter(role::Column::Name.like(format!("%{}%", search)));
        }
        if let Some(guard) = &filter.guard {
            query = query.filter(role::Column::Guard.eq(guard));
        }

        let column = match page.sort_by {
            SortField::Uuid => role::Column::Uuid,
            SortField::Name => role::Column::Name,
            SortField::CreatedAt => role::Column::CreatedAt,
        };
        query = match page.sort_direction {
            SortDirection::Asc => query.order_by_asc(column),
            SortDirection::Desc => query.order_by_desc(column),
        };
        query = query.order_by_asc(role::Column::Uuid);

        let paginator = query.paginate(&txn, page.per_page);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page_index()).await?;

        let mut items = Vec::with_capacity(models.len());
        for model in models {
            let total_permissions = role_permission::Entity::find()
                .filter(role_permission::Column::RoleUuid.eq(model.uuid))
                .count(&txn)
                .await?;
            items.push(RoleWithCount {
                role: model.to_domain_role(),
                total_permissions,
            });
        }
        txn.commit().await?;

        Ok(Page {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Create a role together with its initial permission assignments
    ///
    /// The row insert and the assignment rows commit together or not at all.
    pub async fn create_role(
        &self,
        new_role: NewRole,
        permission_uuids: &[Uuid],
    ) -> Result<RoleWithCount> {
        debug!("Creating role: {} (guard {})", new_role.name, new_role.guard);

        let txn = self.db.begin().await?;

        let now = Utc::now();
        let uuid = Uuid::new_v4();
        let model = role::ActiveModel {
            uuid: Set(uuid),
            name: Set(new_role.name),
            guard: Set(new_role.guard),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        entities::Role::insert(model)
            .exec(&txn)
            .await
            .map_err(|e| map_constraint_err("role name already taken for this guard", e))?;

        Self::replace_role_permissions(&txn, uuid, permission_uuids).await?;

        let total_permissions = role_permission::Entity::find()
            .filter(role_permission::Column::RoleUuid.eq(uuid))
            .count(&txn)
            .await?;
        let model = entities::Role::find_by_id(uuid)
            .one(&txn)
            .await?
            .ok_or_else(|| GatewayError::internal("created role row not readable"))?;
        txn.commit().await?;

        Ok(RoleWithCount {
            role: model.to_domain_role(),
            total_permissions,
        })
    }

    /// Update a role; when `permission_uuids` is supplied the full permission
    /// set is replaced, otherwise existing assignments are left untouched
    pub async fn update_role(
        &self,
        uuid: Uuid,
        changes: RoleChanges,
        permission_uuids: Option<&[Uuid]>,
    ) -> Result<RoleWithCount> {
        debug!("Updating role: {}", uuid);

        let txn = self.db.begin().await?;

        let model = entities::Role::find_by_id(uuid)
            .one(&txn)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("Role not found: {}", uuid)))?;

        let mut active: role::ActiveModel = model.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        active.updated_at = Set(Utc::now().into());

        let model = active
            .update(&txn)
            .await
            .map_err(|e| map_constraint_err("role name already taken for this guard", e))?;

        if let Some(permission_uuids) = permission_uuids {
            Self::replace_role_permissions(&txn, uuid, permission_uuids).await?;
        }

        let total_permissions = role_permission::Entity::find()
            .filter(role_permission::Column::RoleUuid.eq(uuid))
            .count(&txn)
            .await?;
        txn.commit().await?;

        Ok(RoleWithCount {
            role: model.to_domain_role(),
            total_permissions,
        })
    }

    /// Hard-delete a role and every assignment row referencing it
    ///
    /// After the commit the role grants nothing to previously linked users.
    pub async fn delete_role(&self, uuid: Uuid) -> Result<()> {
        debug!("Deleting role: {}", uuid);

        let txn = self.db.begin().await?;

        entities::Role::find_by_id(uuid)
            .one(&txn)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("Role not found: {}", uuid)))?;

        role_permission::Entity::delete_many()
            .filter(role_permission::Column::RoleUuid.eq(uuid))
            .exec(&txn)
            .await?;
        user_role::Entity::delete_many()
            .filter(user_role::Column::RoleUuid.eq(uuid))
            .exec(&txn)
            .await?;
        entities::Role::delete_by_id(uuid).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Replace the role's entire permission set atomically
    pub async fn sync_role_permissions(
        &self,
        role_uuid: Uuid,
        permission_uuids: &[Uuid],
    ) -> Result<Vec<Permission>> {
        debug!("Syncing permissions for role: {}", role_uuid);

        let txn = self.db.begin().await?;

        entities::Role::find_by_id(role_uuid)
            .one(&txn)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("Role not found: {}", role_uuid)))?;

        Self::replace_role_permissions(&txn, role_uuid, permission_uuids).await?;

        let permissions = Self::load_role_permissions(&txn, role_uuid).await?;
        txn.commit().await?;

        Ok(permissions)
    }

    /// Permissions currently attached to a role
    pub async fn role_permissions(&self, role_uuid: Uuid) -> Result<Vec<Permission>> {
        let txn = self.db.begin().await?;

        entities::Role::find_by_id(role_uuid)
            .one(&txn)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("Role not found: {}", role_uuid)))?;

        let permissions = Self::load_role_permissions(&txn, role_uuid).await?;
        txn.commit().await?;

        Ok(permissions)
    }
}
