//! SeaORM identity store implementation
//!
//! Split by entity: user, role, and permission operations plus the shared
//! assignment-table operations. Every multi-row write runs inside a single
//! transaction so concurrent readers observe either the old or the new
//! state in full.

pub mod assignment_ops;
pub mod connection;
pub mod permission_ops;
pub mod role_ops;
pub mod types;
pub mod user_ops;

pub use permission_ops::{NewPermission, PermissionChanges, PermissionFilter};
pub use role_ops::{NewRole, RoleChanges, RoleFilter};
pub use types::{DatabaseBackendType, SeaOrmDatabase};
pub use user_ops::{NewUser, UserChanges, UserFilter};

use crate::utils::error::GatewayError;
use sea_orm::{DbErr, SqlErr};

/// Map constraint violations onto the typed error taxonomy
///
/// The schema's unique constraints are the race-free enforcement point for
/// the uniqueness invariants; this translates their violations into errors
/// callers can branch on.
pub(crate) fn map_constraint_err(context: &str, err: DbErr) -> GatewayError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            GatewayError::DuplicateKey(context.to_string())
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            GatewayError::IntegrityConflict(context.to_string())
        }
        _ => GatewayError::Database(err),
    }
}
