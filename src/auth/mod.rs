//! Authentication and authorization system
//!
//! Tokens authenticate, the store authorizes: a bearer token only proves
//! who is calling, and every permission decision is made against the
//! current role and permission assignments.

pub mod jwt;
pub mod rbac;

use crate::config::AuthConfig;
use crate::core::models::{Permission, User};
use crate::storage::Database;
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use tracing::{debug, info};

pub use jwt::{Claims, JwtHandler, TokenPair, TokenType};
pub use rbac::{
    AccessDecision, AccessGuard, Action, AuthorizationEngine, DenialReason, PermissionCheck,
    ProtectedOperation, Resource,
};

/// Main authentication system
#[derive(Debug, Clone)]
pub struct AuthSystem {
    /// Identity store
    store: Arc<Database>,
    /// JWT handler
    jwt: Arc<JwtHandler>,
    /// Access guard
    guard: AccessGuard,
}

impl AuthSystem {
    /// Create a new authentication system
    pub fn new(config: &AuthConfig, store: Arc<Database>) -> Result<Self> {
        info!("Initializing authentication system");

        let jwt = Arc::new(JwtHandler::new(config)?);
        let engine = AuthorizationEngine::new(store.clone(), config.guard.clone());
        let guard = AccessGuard::new(engine);

        Ok(Self { store, jwt, guard })
    }

    /// Login with username and password, returning a token pair
    ///
    /// Unknown username, wrong password, and deactivated account all
    /// produce the same error so callers cannot probe which usernames
    /// exist.
    pub async fn login(&self, username: &str, password: &str) -> Result<(User, TokenPair)> {
        debug!("Login attempt: {}", username);

        let user = self
            .store
            .find_user_by_username(username, false)
            .await?
            .ok_or_else(|| GatewayError::unauthenticated("Invalid username or password"))?;

        if !crate::utils::crypto::verify_password(password, &user.password_hash)? {
            return Err(GatewayError::unauthenticated("Invalid username or password"));
        }

        let tokens = self.jwt.create_token_pair(user.uuid)?;

        info!("User logged in: {}", username);
        Ok((user, tokens))
    }

    /// Exchange a refresh token for a fresh token pair
    pub async fn refresh(&self, refresh_token: &str) -> Result<(User, TokenPair)> {
        let user_uuid = self.jwt.verify_refresh_token(refresh_token)?;

        let user = self
            .store
            .find_user_by_uuid(user_uuid, false)
            .await?
            .ok_or_else(|| GatewayError::unauthenticated("Account is no longer active"))?;

        let tokens = self.jwt.create_token_pair(user.uuid)?;

        debug!("Token refreshed for user: {}", user.username);
        Ok((user, tokens))
    }

    /// Resolve a bearer access token to its user
    ///
    /// Soft-deleted accounts fail here even when the token itself is still
    /// valid.
    pub async fn resolve_bearer(&self, token: &str) -> Result<User> {
        let user_uuid = self.jwt.verify_access_token(token)?;

        self.store
            .find_user_by_uuid(user_uuid, false)
            .await?
            .ok_or_else(|| GatewayError::unauthenticated("Account is no longer active"))
    }

    /// Effective permissions of a user in the configured guard namespace
    pub async fn effective_permissions(&self, user: &User) -> Result<Vec<Permission>> {
        self.guard.engine().effective_permissions(user.uuid).await
    }

    /// Get JWT handler
    pub fn jwt(&self) -> &JwtHandler {
        &self.jwt
    }

    /// Get access guard
    pub fn guard(&self) -> &AccessGuard {
        &self.guard
    }

    /// Get identity store
    pub fn store(&self) -> &Arc<Database> {
        &self.store
    }
}
