//! Protected operation catalog
//!
//! Every management endpoint maps to exactly one permission name through
//! this table. The mapping is fixed at compile time, so renaming a stored
//! permission never silently changes which endpoints it protects.

/// Resource class an operation acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    User,
    Role,
    Permission,
}

/// Action an operation performs on its resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Index,
    Add,
    Edit,
    Delete,
}

/// One protected management operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProtectedOperation {
    /// Resource class
    pub resource: Resource,
    /// Action performed
    pub action: Action,
}

impl ProtectedOperation {
    /// All protected operations, one per resource and action pair
    pub const ALL: [ProtectedOperation; 12] = [
        Self::new(Resource::User, Action::Index),
        Self::new(Resource::User, Action::Add),
        Self::new(Resource::User, Action::Edit),
        Self::new(Resource::User, Action::Delete),
        Self::new(Resource::Role, Action::Index),
        Self::new(Resource::Role, Action::Add),
        Self::new(Resource::Role, Action::Edit),
        Self::new(Resource::Role, Action::Delete),
        Self::new(Resource::Permission, Action::Index),
        Self::new(Resource::Permission, Action::Add),
        Self::new(Resource::Permission, Action::Edit),
        Self::new(Resource::Permission, Action::Delete),
    ];

    pub const fn new(resource: Resource, action: Action) -> Self {
        Self { resource, action }
    }

    /// Permission name required to perform this operation
    pub const fn required_permission(&self) -> &'static str {
        match (self.resource, self.action) {
            (Resource::User, Action::Index) => "user-index",
            (Resource::User, Action::Add) => "user-add",
            (Resource::User, Action::Edit) => "user-edit",
            (Resource::User, Action::Delete) => "user-delete",
            (Resource::Role, Action::Index) => "role-index",
            (Resource::Role, Action::Add) => "role-add",
            (Resource::Role, Action::Edit) => "role-edit",
            (Resource::Role, Action::Delete) => "role-delete",
            (Resource::Permission, Action::Index) => "permission-index",
            (Resource::Permission, Action::Add) => "permission-add",
            (Resource::Permission, Action::Edit) => "permission-edit",
            (Resource::Permission, Action::Delete) => "permission-delete",
        }
    }
}
