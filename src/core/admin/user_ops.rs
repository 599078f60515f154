//! User management operations

use crate::core::models::{Page, PageRequest, Permission, Role, User};
use crate::storage::database::{NewUser, UserChanges, UserFilter};
use crate::utils::error::{GatewayError, Result};
use tracing::info;
use uuid::Uuid;

use super::manager::AdminService;
use super::types::{CreateUserRequest, UpdateUserRequest};

impl AdminService {
    /// List users
    pub async fn list_users(&self, filter: &UserFilter, page: &PageRequest) -> Result<Page<User>> {
        self.store.list_users(filter, page).await
    }

    /// Get a user by UUID
    pub async fn get_user(&self, uuid: Uuid, include_deleted: bool) -> Result<User> {
        self.store
            .find_user_by_uuid(uuid, include_deleted)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("User not found: {}", uuid)))
    }

    /// Create a user with its initial role assignments
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        Self::validate_display_name(&request.name)?;
        Self::validate_username(&request.username)?;
        Self::validate_email(&request.email)?;
        Self::validate_password(&request.password)?;

        // Friendly pre-checks; uniqueness spans soft-deleted rows, so the
        // lookups include them
        if self
            .store
            .find_user_by_username(&request.username, true)
            .await?
            .is_some()
        {
            return Err(GatewayError::duplicate_key(format!(
                "Username already taken: {}",
                request.username
            )));
        }
        if self
            .store
            .find_user_by_email(&request.email, true)
            .await?
            .is_some()
        {
            return Err(GatewayError::duplicate_key(format!(
                "Email already taken: {}",
                request.email
            )));
        }

        let password_hash = crate::utils::crypto::hash_password(&request.password)?;
        let user = self
            .store
            .create_user(
                NewUser {
                    name: request.name,
                    username: request.username,
                    email: request.email,
                    phone: request.phone,
                    password_hash,
                },
                &request.role_uuids,
            )
            .await?;

        info!("Created user: {} ({})", user.username, user.uuid);
        Ok(user)
    }

    /// Update a user
    pub async fn update_user(&self, uuid: Uuid, request: UpdateUserRequest) -> Result<User> {
        let current = self.get_user(uuid, false).await?;

        if let Some(name) = &request.name {
            Self::validate_display_name(name)?;
        }
        if let Some(username) = &request.username {
            Self::validate_username(username)?;
            if *username != current.username
                && self
                    .store
                    .find_user_by_username(username, true)
                    .await?
                    .is_some()
            {
                return Err(GatewayError::duplicate_key(format!(
                    "Username already taken: {}",
                    username
                )));
            }
        }
        if let Some(email) = &request.email {
            Self::validate_email(email)?;
            if *email != current.email
                && self.store.find_user_by_email(email, true).await?.is_some()
            {
                return Err(GatewayError::duplicate_key(format!(
                    "Email already taken: {}",
                    email
                )));
            }
        }

        let password_hash = match &request.password {
            Some(password) => {
                Self::validate_password(password)?;
                Some(crate::utils::crypto::hash_password(password)?)
            }
            None => None,
        };

        let user = self
            .store
            .update_user(
                uuid,
                UserChanges {
                    name: request.name,
                    username: request.username,
                    email: request.email,
                    phone: request.phone,
                    password_hash,
                },
                request.role_uuids.as_deref(),
            )
            .await?;

        info!("Updated user: {} ({})", user.username, user.uuid);
        Ok(user)
    }

    /// Soft-delete a user
    pub async fn delete_user(&self, uuid: Uuid) -> Result<()> {
        self.store.soft_delete_user(uuid).await?;
        info!("Deactivated user: {}", uuid);
        Ok(())
    }

    /// Replace a user's role set
    pub async fn sync_user_roles(&self, user_uuid: Uuid, role_uuids: &[Uuid]) -> Result<User> {
        let user = self.store.sync_user_roles(user_uuid, role_uuids).await?;
        info!(
            "Synced {} role(s) for user: {}",
            user.role_uuids.len(),
            user_uuid
        );
        Ok(user)
    }

    /// Add a single role to a user
    pub async fn assign_role_to_user(&self, user_uuid: Uuid, role_uuid: Uuid) -> Result<User> {
        let user = self.store.assign_role_to_user(user_uuid, role_uuid).await?;
        info!("Assigned role {} to user {}", role_uuid, user_uuid);
        Ok(user)
    }

    /// Roles directly assigned to a user
    pub async fn user_roles(&self, user_uuid: Uuid) -> Result<Vec<Role>> {
        self.store.user_roles(user_uuid).await
    }

    /// Effective permissions of a user through its roles
    pub async fn user_permissions(&self, user_uuid: Uuid) -> Result<Vec<Permission>> {
        self.store.permissions_for_user(user_uuid).await
    }
}
