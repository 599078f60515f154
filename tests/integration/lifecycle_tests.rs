//! End-to-end lifecycle tests
//!
//! Drives the full administrative flow: bootstrap, login, guarded CRUD,
//! assignment syncs, and account deactivation.

use identity_gateway::GatewayError;
use identity_gateway::auth::{Action, ProtectedOperation, Resource};
use identity_gateway::core::admin::{UpdateRoleRequest, UpdateUserRequest};
use uuid::Uuid;

use crate::common::{TestGateway, fixtures};

#[tokio::test]
async fn test_full_administrative_flow() {
    let gateway = TestGateway::bootstrapped().await;

    // Admin logs in and is allowed to manage users
    let (_, tokens) = gateway.login_admin().await;
    let admin = gateway
        .auth
        .resolve_bearer(&tokens.access_token)
        .await
        .unwrap();
    gateway
        .auth
        .guard()
        .authorize(&admin, ProtectedOperation::new(Resource::User, Action::Add))
        .await
        .unwrap();

    // Admin creates a role for operators and a user holding it
    let edit_permission = gateway
        .store
        .find_permission_by_name("user-edit", "api")
        .await
        .unwrap()
        .unwrap();
    let operators = gateway
        .admin
        .create_role(fixtures::role_request("operator", vec![edit_permission.uuid]))
        .await
        .unwrap();
    assert_eq!(operators.total_permissions, 1);

    let alice = gateway
        .admin
        .create_user(fixtures::user_request("alice", vec![operators.role.uuid]))
        .await
        .unwrap();
    assert_eq!(alice.role_uuids, vec![operators.role.uuid]);

    // Alice can edit users but not delete them
    let (alice, _) = gateway.login("alice", fixtures::TEST_PASSWORD).await;
    gateway
        .auth
        .guard()
        .authorize(&alice, ProtectedOperation::new(Resource::User, Action::Edit))
        .await
        .unwrap();
    let denied = gateway
        .auth
        .guard()
        .authorize(&alice, ProtectedOperation::new(Resource::User, Action::Delete))
        .await
        .unwrap_err();
    assert!(matches!(denied, GatewayError::InsufficientPermission(_)));

    // Deactivation locks the account out entirely
    gateway.admin.delete_user(alice.uuid).await.unwrap();
    assert!(
        gateway
            .auth
            .login("alice", fixtures::TEST_PASSWORD)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_create_user_with_unknown_role_is_atomic() {
    let gateway = TestGateway::new().await;

    let err = gateway
        .admin
        .create_user(fixtures::user_request("alice", vec![Uuid::new_v4()]))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::IntegrityConflict(_)));

    // The failed create left no user row behind
    assert!(
        gateway
            .store
            .find_user_by_username("alice", true)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_sync_with_unknown_permission_preserves_old_set() {
    let gateway = TestGateway::new().await;

    let permission = gateway
        .admin
        .create_permission(fixtures::permission_request("report-read"))
        .await
        .unwrap();
    let role = gateway
        .admin
        .create_role(fixtures::role_request("viewer", vec![permission.uuid]))
        .await
        .unwrap();

    let err = gateway
        .admin
        .sync_role_permissions(role.role.uuid, &[permission.uuid, Uuid::new_v4()])
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::IntegrityConflict(_)));

    // The previous assignment survives the failed sync
    let current = gateway.admin.role_permissions(role.role.uuid).await.unwrap();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].uuid, permission.uuid);
}

#[tokio::test]
async fn test_duplicate_username_rejected_even_after_deactivation() {
    let gateway = TestGateway::new().await;

    let alice = gateway
        .admin
        .create_user(fixtures::user_request("alice", vec![]))
        .await
        .unwrap();
    gateway.admin.delete_user(alice.uuid).await.unwrap();

    let err = gateway
        .admin
        .create_user(fixtures::user_request("alice", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::DuplicateKey(_)));
}

#[tokio::test]
async fn test_update_user_without_roles_keeps_assignments() {
    let gateway = TestGateway::new().await;

    let role = gateway
        .admin
        .create_role(fixtures::role_request("viewer", vec![]))
        .await
        .unwrap();
    let alice = gateway
        .admin
        .create_user(fixtures::user_request("alice", vec![role.role.uuid]))
        .await
        .unwrap();

    let updated = gateway
        .admin
        .update_user(
            alice.uuid,
            UpdateUserRequest {
                name: Some("Alice Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Alice Renamed");
    assert_eq!(updated.role_uuids, vec![role.role.uuid]);

    // An explicit empty set clears them
    let cleared = gateway
        .admin
        .update_user(
            alice.uuid,
            UpdateUserRequest {
                role_uuids: Some(vec![]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(cleared.role_uuids.is_empty());
}

#[tokio::test]
async fn test_permission_rename_propagates_to_checks() {
    let gateway = TestGateway::new().await;

    let permission = gateway
        .admin
        .create_permission(fixtures::permission_request("report-read"))
        .await
        .unwrap();
    let role = gateway
        .admin
        .create_role(fixtures::role_request("viewer", vec![permission.uuid]))
        .await
        .unwrap();
    let alice = gateway
        .admin
        .create_user(fixtures::user_request("alice", vec![role.role.uuid]))
        .await
        .unwrap();

    gateway
        .admin
        .update_permission(
            permission.uuid,
            identity_gateway::core::admin::UpdatePermissionRequest {
                name: "report-view".to_string(),
            },
        )
        .await
        .unwrap();

    let engine = gateway.auth.guard().engine();
    assert!(!engine.has_permission(alice.uuid, "report-read").await.unwrap());
    assert!(engine.has_permission(alice.uuid, "report-view").await.unwrap());
}

#[tokio::test]
async fn test_role_rename_keeps_permissions_and_holders() {
    let gateway = TestGateway::new().await;

    let permission = gateway
        .admin
        .create_permission(fixtures::permission_request("report-read"))
        .await
        .unwrap();
    let role = gateway
        .admin
        .create_role(fixtures::role_request("viewer", vec![permission.uuid]))
        .await
        .unwrap();
    let alice = gateway
        .admin
        .create_user(fixtures::user_request("alice", vec![role.role.uuid]))
        .await
        .unwrap();

    let renamed = gateway
        .admin
        .update_role(
            role.role.uuid,
            UpdateRoleRequest {
                name: Some("report-viewer".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.role.name, "report-viewer");
    assert_eq!(renamed.total_permissions, 1);

    let engine = gateway.auth.guard().engine();
    assert!(engine.has_permission(alice.uuid, "report-read").await.unwrap());
}

#[tokio::test]
async fn test_validation_errors_reject_bad_input() {
    let gateway = TestGateway::new().await;

    let mut bad_email = fixtures::user_request("alice", vec![]);
    bad_email.email = "not-an-email".to_string();
    let err = gateway.admin.create_user(bad_email).await.unwrap_err();
    assert!(matches!(err, GatewayError::Validation(_)));

    let mut short_password = fixtures::user_request("bob", vec![]);
    short_password.password = "short".to_string();
    let err = gateway.admin.create_user(short_password).await.unwrap_err();
    assert!(matches!(err, GatewayError::Validation(_)));

    let err = gateway
        .admin
        .create_role(fixtures::role_request("Bad Role Name", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Validation(_)));
}
