//! Management service
//!
//! CRUD for users, roles, and permissions plus the assignment syncs, built
//! on top of the identity store.

mod bootstrap;
mod manager;
mod permission_ops;
mod role_ops;
#[cfg(test)]
mod tests;
mod types;
mod user_ops;

pub use bootstrap::SUPER_ADMIN_ROLE;
pub use manager::AdminService;
pub use types::{
    CreatePermissionRequest, CreateRoleRequest, CreateUserRequest, UpdatePermissionRequest,
    UpdateRoleRequest, UpdateUserRequest,
};
