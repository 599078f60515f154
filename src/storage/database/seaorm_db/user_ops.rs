use crate::core::models::{Page, PageRequest, Role, SortDirection, SortField, User};
use crate::utils::error::{GatewayError, Result};
use chrono::Utc;
use sea_orm::*;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, role, user, user_role};
use super::map_constraint_err;
use super::types::SeaOrmDatabase;

/// Filter for user listings
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Substring match against name, username, and email
    pub search: Option<String>,
    /// Only users holding this role
    pub role_uuid: Option<Uuid>,
    /// Include soft-deleted users
    pub include_deleted: bool,
}

/// Attributes for a new user row
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
}

/// Column-level changes to an existing user; `None` leaves a column untouched
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password_hash: Option<String>,
}

impl SeaOrmDatabase {
    /// Find user by UUID
    pub async fn find_user_by_uuid(
        &self,
        uuid: Uuid,
        include_deleted: bool,
    ) -> Result<Option<User>> {
        debug!("Finding user by UUID: {}", uuid);

        let txn = self.db.begin().await?;
        let found = Self::load_user(&txn, uuid, include_deleted).await?;
        txn.commit().await?;

        Ok(found)
    }

    /// Find user by username
    pub async fn find_user_by_username(
        &self,
        username: &str,
        include_deleted: bool,
    ) -> Result<Option<User>> {
        debug!("Finding user by username: {}", username);

        let txn = self.db.begin().await?;

        let mut query = entities::User::find().filter(user::Column::Username.eq(username));
        if !include_deleted {
            query = query.filter(user::Column::DeletedAt.is_null());
        }

        let found = match query.one(&txn).await? {
            Some(model) => {
                let role_uuids = Self::role_uuids_of(&txn, model.uuid).await?;
                Some(model.to_domain_user(role_uuids))
            }
            None => None,
        };
        txn.commit().await?;

        Ok(found)
    }

    /// Find user by email
    pub async fn find_user_by_email(
        &self,
        email: &str,
        include_deleted: bool,
    ) -> Result<Option<User>> {
        debug!("Finding user by email: {}", email);

        let txn = self.db.begin().await?;

        let mut query = entities::User::find().filter(user::Column::Email.eq(email));
        if !include_deleted {
            query = query.filter(user::Column::DeletedAt.is_null());
        }

        let found = match query.one(&txn).await? {
            Some(model) => {
                let role_uuids = Self::role_uuids_of(&txn, model.uuid).await?;
                Some(model.to_domain_user(role_uuids))
            }
            None => None,
        };
        txn.commit().await?;

        Ok(found)
    }

    /// List users with deterministic ordering and pagination
    pub async fn list_users(&self, filter: &UserFilter, page: &PageRequest) -> Result<Page<User>> {
        debug!("Listing users: {:?} {:?}", filter, page);

        let txn = self.db.begin().await?;

        let mut query = entities::User::find();
        if !filter.include_deleted {
            query = query.filter(user::Column::DeletedAt.is_null());
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", search);
            query = query.filter(
                Condition::any()
                    .add(user::Column::Name.like(&pattern))
                    .add(user::Column::Username.like(&pattern))
                    .add(user::Column::Email.like(&pattern)),
            );
        }
        if let Some(role_uuid) = filter.role_uuid {
            let member_uuids: Vec<Uuid> = user_role::Entity::find()
                .filter(user_role::Column::RoleUuid.eq(role_uuid))
                .all(&txn)
                .await?
                .into_iter()
                .map(|link| link.user_uuid)
                .collect();
            query = query.filter(user::Column::Uuid.is_in(member_uuids));
        }

        let column = match page.sort_by {
            SortField::Uuid => user::Column::Uuid,
            SortField::Name => user::Column::Username,
            SortField::CreatedAt => user::Column::CreatedAt,
        };
        query = match page.sort_direction {
            SortDirection::Asc => query.order_by_asc(column),
            SortDirection::Desc => query.order_by_desc(column),
        };
        // UUID tie break keeps pagination deterministic across calls
        query = query.order_by_asc(user::Column::Uuid);

        let paginator = query.paginate(&txn, page.per_page);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page_index()).await?;

        // Attach role assignments for the page in one query
        let page_uuids: Vec<Uuid> = models.iter().map(|m| m.uuid).collect();
        let mut roles_by_user: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        if !page_uuids.is_empty() {
            for link in user_role::Entity::find()
                .filter(user_role::Column::UserUuid.is_in(page_uuids))
                .all(&txn)
                .await?
            {
                roles_by_user
                    .entry(link.user_uuid)
                    .or_default()
                    .push(link.role_uuid);
            }
        }
        txn.commit().await?;

        let items = models
            .into_iter()
            .map(|model| {
                let role_uuids = roles_by_user.remove(&model.uuid).unwrap_or_default();
                model.to_domain_user(role_uuids)
            })
            .collect();

        Ok(Page {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Create a user together with its initial role assignments
    ///
    /// The row insert and the assignment rows commit together or not at all;
    /// an unresolvable role UUID aborts the whole create.
    pub async fn create_user(&self, new_user: NewUser, role_uuids: &[Uuid]) -> Result<User> {
        debug!("Creating user: {}", new_user.username);

        let txn = self.db.begin().await?;

        let now = Utc::now();
        let uuid = Uuid::new_v4();
        let model = user::ActiveModel {
            uuid: Set(uuid),
            name: Set(new_user.name),
            username: Set(new_user.username),
            email: Set(new_user.email),
            phone: Set(new_user.phone),
            password_hash: Set(new_user.password_hash),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            deleted_at: Set(None),
        };

        entities::User::insert(model)
            .exec(&txn)
            .await
            .map_err(|e| map_constraint_err("username or email already taken", e))?;

        Self::replace_user_roles(&txn, uuid, role_uuids).await?;

        let user = Self::load_user(&txn, uuid, false)
            .await?
            .ok_or_else(|| GatewayError::internal("created user row not readable"))?;
        txn.commit().await?;

        Ok(user)
    }

    /// Update a user; when `role_uuids` is supplied the full role set is
    /// replaced, otherwise existing assignments are left untouched
    pub async fn update_user(
        &self,
        uuid: Uuid,
        changes: UserChanges,
        role_uuids: Option<&[Uuid]>,
    ) -> Result<User> {
        debug!("Updating user: {}", uuid);

        let txn = self.db.begin().await?;

        let model = entities::User::find_by_id(uuid)
            .filter(user::Column::DeletedAt.is_null())
            .one(&txn)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("User not found: {}", uuid)))?;

        let mut active: user::ActiveModel = model.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(username) = changes.username {
            active.username = Set(username);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(phone) = changes.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        active.updated_at = Set(Utc::now().into());

        active
            .update(&txn)
            .await
            .map_err(|e| map_constraint_err("username or email already taken", e))?;

        if let Some(role_uuids) = role_uuids {
            Self::replace_user_roles(&txn, uuid, role_uuids).await?;
        }

        let user = Self::load_user(&txn, uuid, false)
            .await?
            .ok_or_else(|| GatewayError::internal("updated user row not readable"))?;
        txn.commit().await?;

        Ok(user)
    }

    /// Soft-delete a user
    ///
    /// The row stays in place and its role assignments survive; default
    /// lookups and listings exclude it from here on.
    pub async fn soft_delete_user(&self, uuid: Uuid) -> Result<()> {
        debug!("Soft-deleting user: {}", uuid);

        let model = entities::User::find_by_id(uuid)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("User not found: {}", uuid)))?;

        let now = Utc::now();
        let mut active: user::ActiveModel = model.into();
        active.deleted_at = Set(Some(now.into()));
        active.updated_at = Set(now.into());
        active.update(&self.db).await?;

        Ok(())
    }

    /// Replace the user's entire role set atomically
    pub async fn sync_user_roles(&self, user_uuid: Uuid, role_uuids: &[Uuid]) -> Result<User> {
        debug!("Syncing roles for user: {}", user_uuid);

        let txn = self.db.begin().await?;

        entities::User::find_by_id(user_uuid)
            .filter(user::Column::DeletedAt.is_null())
            .one(&txn)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("User not found: {}", user_uuid)))?;

        Self::replace_user_roles(&txn, user_uuid, role_uuids).await?;

        let user = Self::load_user(&txn, user_uuid, false)
            .await?
            .ok_or_else(|| GatewayError::internal("synced user row not readable"))?;
        txn.commit().await?;

        Ok(user)
    }

    /// Roles directly assigned to a user
    ///
    /// Works for soft-deleted users too: historical assignments stay
    /// queryable even though the user is gone from default listings.
    pub async fn user_roles(&self, user_uuid: Uuid) -> Result<Vec<Role>> {
        let txn = self.db.begin().await?;

        entities::User::find_by_id(user_uuid)
            .one(&txn)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("User not found: {}", user_uuid)))?;

        let role_uuids = Self::role_uuids_of(&txn, user_uuid).await?;
        let roles = entities::Role::find()
            .filter(role::Column::Uuid.is_in(role_uuids))
            .order_by_asc(role::Column::Name)
            .order_by_asc(role::Column::Uuid)
            .all(&txn)
            .await?;
        txn.commit().await?;

        Ok(roles.iter().map(|model| model.to_domain_role()).collect())
    }

    /// Load a user and its role assignments inside an open transaction
    pub(super) async fn load_user<C: ConnectionTrait>(
        conn: &C,
        uuid: Uuid,
        include_deleted: bool,
    ) -> Result<Option<User>> {
        let mut query = entities::User::find_by_id(uuid);
        if !include_deleted {
            query = query.filter(user::Column::DeletedAt.is_null());
        }

        let Some(model) = query.one(conn).await? else {
            return Ok(None);
        };

        let role_uuids = Self::role_uuids_of(conn, uuid).await?;
        Ok(Some(model.to_domain_user(role_uuids)))
    }

    /// UUIDs of the roles assigned to a user
    pub(super) async fn role_uuids_of<C: ConnectionTrait>(
        conn: &C,
        user_uuid: Uuid,
    ) -> Result<Vec<Uuid>> {
        let links = user_role::Entity::find()
            .filter(user_role::Column::UserUuid.eq(user_uuid))
            .all(conn)
            .await?;

        Ok(links.into_iter().map(|link| link.role_uuid).collect())
    }
}
