//! Role-based authorization
//!
//! The engine resolves effective permissions from the identity store; the
//! guard combines that with the protected operation catalog.

mod engine;
mod guard;
mod operations;
mod types;

pub use engine::AuthorizationEngine;
pub use guard::AccessGuard;
pub use operations::{Action, ProtectedOperation, Resource};
pub use types::{AccessDecision, DenialReason, PermissionCheck};
