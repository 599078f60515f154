//! Assignment-table operations shared by the user and role stores
//!
//! The replace helpers are generic over the connection so they compose into
//! the callers' transactions: a create-with-assignments or a sync is one
//! commit, never a partially applied link set.

use crate::core::models::{Permission, Role, User};
use crate::utils::error::{GatewayError, Result};
use sea_orm::*;
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, permission, role, role_permission, user, user_role};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Add a single role to a user, keeping existing assignments
    pub async fn assign_role_to_user(&self, user_uuid: Uuid, role_uuid: Uuid) -> Result<User> {
        debug!("Assigning role {} to user {}", role_uuid, user_uuid);

        let txn = self.db.begin().await?;

        entities::User::find_by_id(user_uuid)
            .filter(user::Column::DeletedAt.is_null())
            .one(&txn)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("User not found: {}", user_uuid)))?;

        let mut desired = Self::role_uuids_of(&txn, user_uuid).await?;
        if !desired.contains(&role_uuid) {
            desired.push(role_uuid);
        }
        Self::replace_user_roles(&txn, user_uuid, &desired).await?;

        let user = Self::load_user(&txn, user_uuid, false)
            .await?
            .ok_or_else(|| GatewayError::internal("assigned user row not readable"))?;
        txn.commit().await?;

        Ok(user)
    }

    /// Add a single permission to a role, keeping existing assignments
    pub async fn assign_permission_to_role(
        &self,
        role_uuid: Uuid,
        permission_uuid: Uuid,
    ) -> Result<Vec<Permission>> {
        debug!(
            "Assigning permission {} to role {}",
            permission_uuid, role_uuid
        );

        let txn = self.db.begin().await?;

        entities::Role::find_by_id(role_uuid)
            .one(&txn)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("Role not found: {}", role_uuid)))?;

        let mut desired: Vec<Uuid> = role_permission::Entity::find()
            .filter(role_permission::Column::RoleUuid.eq(role_uuid))
            .all(&txn)
            .await?
            .into_iter()
            .map(|link| link.permission_uuid)
            .collect();
        if !desired.contains(&permission_uuid) {
            desired.push(permission_uuid);
        }
        Self::replace_role_permissions(&txn, role_uuid, &desired).await?;

        let permissions = Self::load_role_permissions(&txn, role_uuid).await?;
        txn.commit().await?;

        Ok(permissions)
    }

    /// Effective permissions of a user, derived through role assignments
    ///
    /// The role links, permission links, and permission rows are all read
    /// inside one transaction so the result is a consistent snapshot even
    /// while syncs run concurrently. Soft-deleted users keep their
    /// assignments, so this resolves for them as well.
    pub async fn permissions_for_user(&self, user_uuid: Uuid) -> Result<Vec<Permission>> {
        let txn = self.db.begin().await?;

        entities::User::find_by_id(user_uuid)
            .one(&txn)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("User not found: {}", user_uuid)))?;

        let role_uuids = Self::role_uuids_of(&txn, user_uuid).await?;
        if role_uuids.is_empty() {
            txn.commit().await?;
            return Ok(Vec::new());
        }

        let permission_uuids: HashSet<Uuid> = role_permission::Entity::find()
            .filter(role_permission::Column::RoleUuid.is_in(role_uuids))
            .all(&txn)
            .await?
            .into_iter()
            .map(|link| link.permission_uuid)
            .collect();

        let models = entities::Permission::find()
            .filter(permission::Column::Uuid.is_in(permission_uuids))
            .order_by_asc(permission::Column::Name)
            .order_by_asc(permission::Column::Uuid)
            .all(&txn)
            .await?;
        txn.commit().await?;

        Ok(models
            .iter()
            .map(|model| model.to_domain_permission())
            .collect())
    }

    /// Roles currently granting a permission
    pub async fn roles_with_permission(&self, permission_uuid: Uuid) -> Result<Vec<Role>> {
        let txn = self.db.begin().await?;

        entities::Permission::find_by_id(permission_uuid)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                GatewayError::not_found(format!("Permission not found: {}", permission_uuid))
            })?;

        let role_uuids: Vec<Uuid> = role_permission::Entity::find()
            .filter(role_permission::Column::PermissionUuid.eq(permission_uuid))
            .all(&txn)
            .await?
            .into_iter()
            .map(|link| link.role_uuid)
            .collect();

        let models = entities::Role::find()
            .filter(role::Column::Uuid.is_in(role_uuids))
            .order_by_asc(role::Column::Name)
            .order_by_asc(role::Column::Uuid)
            .all(&txn)
            .await?;
        txn.commit().await?;

        Ok(models.iter().map(|model| model.to_domain_role()).collect())
    }

    /// Replace a user's role links with exactly the given set
    ///
    /// Fails without writing anything if any UUID does not resolve to a
    /// role. Duplicates in the input collapse to one link. Only the
    /// difference is written, so untouched links keep their rows.
    pub(super) async fn replace_user_roles<C: ConnectionTrait>(
        conn: &C,
        user_uuid: Uuid,
        role_uuids: &[Uuid],
    ) -> Result<()> {
        let desired: HashSet<Uuid> = role_uuids.iter().copied().collect();

        let found: HashSet<Uuid> = entities::Role::find()
            .filter(role::Column::Uuid.is_in(desired.iter().copied()))
            .all(conn)
            .await?
            .into_iter()
            .map(|model| model.uuid)
            .collect();
        if let Some(missing) = desired.difference(&found).next() {
            return Err(GatewayError::integrity_conflict(format!(
                "Unknown role: {}",
                missing
            )));
        }

        let current: HashSet<Uuid> = user_role::Entity::find()
            .filter(user_role::Column::UserUuid.eq(user_uuid))
            .all(conn)
            .await?
            .into_iter()
            .map(|link| link.role_uuid)
            .collect();

        let extraneous: Vec<Uuid> = current.difference(&desired).copied().collect();
        if !extraneous.is_empty() {
            user_role::Entity::delete_many()
                .filter(user_role::Column::UserUuid.eq(user_uuid))
                .filter(user_role::Column::RoleUuid.is_in(extraneous))
                .exec(conn)
                .await?;
        }

        let additions: Vec<user_role::ActiveModel> = desired
            .difference(&current)
            .map(|role_uuid| user_role::ActiveModel {
                user_uuid: Set(user_uuid),
                role_uuid: Set(*role_uuid),
            })
            .collect();
        if !additions.is_empty() {
            user_role::Entity::insert_many(additions).exec(conn).await?;
        }

        Ok(())
    }

    /// Replace a role's permission links with exactly the given set
    pub(super) async fn replace_role_permissions<C: ConnectionTrait>(
        conn: &C,
        role_uuid: Uuid,
        permission_uuids: &[Uuid],
    ) -> Result<()> {
        let desired: HashSet<Uuid> = permission_uuids.iter().copied().collect();

        let found: HashSet<Uuid> = entities::Permission::find()
            .filter(permission::Column::Uuid.is_in(desired.iter().copied()))
            .all(conn)
            .await?
            .into_iter()
            .map(|model| model.uuid)
            .collect();
        if let Some(missing) = desired.difference(&found).next() {
            return Err(GatewayError::integrity_conflict(format!(
                "Unknown permission: {}",
                missing
            )));
        }

        let current: HashSet<Uuid> = role_permission::Entity::find()
            .filter(role_permission::Column::RoleUuid.eq(role_uuid))
            .all(conn)
            .await?
            .into_iter()
            .map(|link| link.permission_uuid)
            .collect();

        let extraneous: Vec<Uuid> = current.difference(&desired).copied().collect();
        if !extraneous.is_empty() {
            role_permission::Entity::delete_many()
                .filter(role_permission::Column::RoleUuid.eq(role_uuid))
                .filter(role_permission::Column::PermissionUuid.is_in(extraneous))
                .exec(conn)
                .await?;
        }

        let additions: Vec<role_permission::ActiveModel> = desired
            .difference(&current)
            .map(|permission_uuid| role_permission::ActiveModel {
                role_uuid: Set(role_uuid),
                permission_uuid: Set(*permission_uuid),
            })
            .collect();
        if !additions.is_empty() {
            role_permission::Entity::insert_many(additions)
                .exec(conn)
                .await?;
        }

        Ok(())
    }

    /// Load a role's permissions inside an open transaction
    pub(super) async fn load_role_permissions<C: ConnectionTrait>(
        conn: &C,
        role_uuid: Uuid,
    ) -> Result<Vec<Permission>> {
        let permission_uuids: Vec<Uuid> = role_permission::Entity::find()
            .filter(role_permission::Column::RoleUuid.eq(role_uuid))
            .all(conn)
            .await?
            .into_iter()
            .map(|link| link.permission_uuid)
            .collect();

        let models = entities::Permission::find()
            .filter(permission::Column::Uuid.is_in(permission_uuids))
            .order_by_asc(permission::Column::Name)
            .order_by_asc(permission::Column::Uuid)
            .all(conn)
            .await?;

        Ok(models
            .iter()
            .map(|model| model.to_domain_permission())
            .collect())
    }
}
