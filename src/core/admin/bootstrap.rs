//! Startup seeding
//!
//! Ensures the operation permissions exist and that a `super-admin` role
//! holds all of them. Administrator power is an ordinary role with every
//! permission assigned; nothing in the authorization path special-cases
//! its name.

use crate::auth::ProtectedOperation;
use crate::config::BootstrapConfig;
use crate::storage::database::{NewPermission, NewRole, NewUser};
use crate::utils::error::Result;
use tracing::{info, warn};
use uuid::Uuid;

use super::manager::AdminService;

/// Name of the seeded role holding every operation permission
pub const SUPER_ADMIN_ROLE: &str = "super-admin";

impl AdminService {
    /// Seed operation permissions, the super-admin role, and optionally an
    /// initial admin user
    ///
    /// Idempotent: rows that already exist are kept as they are, except
    /// that the super-admin role is always re-synced to hold every
    /// operation permission.
    pub async fn bootstrap(&self, config: &BootstrapConfig) -> Result<()> {
        info!("Bootstrapping identity data (guard {})", self.guard);

        let mut permission_uuids = Vec::with_capacity(ProtectedOperation::ALL.len());
        for operation in ProtectedOperation::ALL {
            let name = operation.required_permission();
            let permission = match self.store.find_permission_by_name(name, &self.guard).await? {
                Some(existing) => existing,
                None => {
                    self.store
                        .create_permission(NewPermission {
                            name: name.to_string(),
                            guard: self.guard.clone(),
                        })
                        .await?
                }
            };
            permission_uuids.push(permission.uuid);
        }

        let role_uuid = match self
            .store
            .find_role_by_name(SUPER_ADMIN_ROLE, &self.guard)
            .await?
        {
            Some(existing) => {
                self.store
                    .sync_role_permissions(existing.uuid, &permission_uuids)
                    .await?;
                existing.uuid
            }
            None => {
                self.store
                    .create_role(
                        NewRole {
                            name: SUPER_ADMIN_ROLE.to_string(),
                            guard: self.guard.clone(),
                        },
                        &permission_uuids,
                    )
                    .await?
                    .role
                    .uuid
            }
        };

        self.seed_admin_user(config, role_uuid).await?;

        info!("Bootstrap complete");
        Ok(())
    }

    /// Create the initial admin user when no users exist yet
    async fn seed_admin_user(&self, config: &BootstrapConfig, role_uuid: Uuid) -> Result<()> {
        if self
            .store
            .find_user_by_username(&config.admin_username, true)
            .await?
            .is_some()
        {
            return Ok(());
        }

        let Some(password) = &config.admin_password else {
            warn!("No bootstrap admin password configured; skipping admin user creation");
            return Ok(());
        };

        let password_hash = crate::utils::crypto::hash_password(password)?;
        let user = self
            .store
            .create_user(
                NewUser {
                    name: "Administrator".to_string(),
                    username: config.admin_username.clone(),
                    email: config.admin_email.clone(),
                    phone: None,
                    password_hash,
                },
                &[role_uuid],
            )
            .await?;

        info!("Created bootstrap admin user: {}", user.username);
        Ok(())
    }
}
