//! SeaORM entity definitions
//!
//! One module per table plus conversions to the domain models.

pub mod permission;
pub mod role;
pub mod role_permission;
pub mod user;
pub mod user_role;

pub use permission::Entity as Permission;
pub use role::Entity as Role;
pub use role_permission::Entity as RolePermission;
pub use user::Entity as User;
pub use user_role::Entity as UserRole;
