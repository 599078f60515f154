//! Authorization type definitions

/// Permission check result
#[derive(Debug, Clone)]
pub struct PermissionCheck {
    /// Whether permission is granted
    pub granted: bool,
    /// Roles that granted the permission
    pub granted_by_roles: Vec<String>,
    /// Reason for denial (if not granted)
    pub denial_reason: Option<String>,
}

/// Outcome of an access guard evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// The caller may perform the operation
    Allow,
    /// The caller may not perform the operation
    Deny(DenialReason),
}

/// Why an access guard evaluation denied the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    /// The caller's account has been deactivated
    SubjectDeleted,
    /// The caller lacks the operation's required permission
    MissingPermission(&'static str),
}
