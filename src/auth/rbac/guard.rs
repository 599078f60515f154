//! Access guard enforcing the operation catalog

use crate::core::models::User;
use crate::utils::error::{GatewayError, Result};
use tracing::debug;

use super::engine::AuthorizationEngine;
use super::operations::ProtectedOperation;
use super::types::{AccessDecision, DenialReason};

/// Guard evaluating whether an authenticated user may perform a protected
/// operation
///
/// Deactivated accounts are refused outright even though their tokens may
/// still be within their validity window.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    engine: AuthorizationEngine,
}

impl AccessGuard {
    /// Create a new access guard
    pub fn new(engine: AuthorizationEngine) -> Self {
        Self { engine }
    }

    /// Underlying authorization engine
    pub fn engine(&self) -> &AuthorizationEngine {
        &self.engine
    }

    /// Evaluate an operation for a user
    pub async fn evaluate(
        &self,
        user: &User,
        operation: ProtectedOperation,
    ) -> Result<AccessDecision> {
        if user.is_deleted() {
            debug!("Access denied for deactivated user: {}", user.uuid);
            return Ok(AccessDecision::Deny(DenialReason::SubjectDeleted));
        }

        let required = operation.required_permission();
        if self.engine.has_permission(user.uuid, required).await? {
            Ok(AccessDecision::Allow)
        } else {
            debug!(
                "Access denied for user {}: missing {}",
                user.uuid, required
            );
            Ok(AccessDecision::Deny(DenialReason::MissingPermission(
                required,
            )))
        }
    }

    /// Evaluate an operation and turn a denial into a typed error
    pub async fn authorize(&self, user: &User, operation: ProtectedOperation) -> Result<()> {
        match self.evaluate(user, operation).await? {
            AccessDecision::Allow => Ok(()),
            AccessDecision::Deny(DenialReason::SubjectDeleted) => {
                Err(GatewayError::unauthenticated("Account is deactivated"))
            }
            AccessDecision::Deny(DenialReason::MissingPermission(required)) => Err(
                GatewayError::insufficient_permission(format!("Missing permission: {}", required)),
            ),
        }
    }
}
