//! Domain models
//!
//! Plain data types shared between the storage layer, the authorization
//! engine, and the HTTP surface. Entities own no behavior beyond simple
//! accessors; authorization is computed by a standalone engine, never mixed
//! into the model types.

pub mod page;
pub mod permission;
pub mod role;
pub mod user;

pub use page::{Page, PageRequest, SortDirection, SortField};
pub use permission::Permission;
pub use role::{Role, RoleWithCount};
pub use user::User;

/// Guard namespace used when a request context does not specify one
pub const DEFAULT_GUARD: &str = "api";
