//! Authorization integration tests
//!
//! Verifies that access decisions always reflect the current state of the
//! identity store: grants and revocations apply on the next check, and
//! administrative power is nothing but a role holding every operation
//! permission.

use identity_gateway::auth::{AccessDecision, Action, ProtectedOperation, Resource};
use identity_gateway::core::admin::SUPER_ADMIN_ROLE;
use identity_gateway::storage::database::RoleFilter;
use identity_gateway::core::models::PageRequest;

use crate::common::{TestGateway, fixtures};

/// A role granting `user-index` and nothing else
async fn seed_viewer_role(gateway: &TestGateway) -> uuid::Uuid {
    let permission = gateway
        .store
        .find_permission_by_name("user-index", "api")
        .await
        .unwrap()
        .expect("bootstrap seeds user-index");
    let role = gateway
        .admin
        .create_role(fixtures::role_request("user-viewer", vec![permission.uuid]))
        .await
        .unwrap();
    role.role.uuid
}

#[tokio::test]
async fn test_bootstrap_admin_passes_every_operation() {
    let gateway = TestGateway::bootstrapped().await;
    let (admin, _) = gateway.login_admin().await;

    for operation in ProtectedOperation::ALL {
        gateway
            .auth
            .guard()
            .authorize(&admin, operation)
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_user_without_roles_is_denied_everywhere() {
    let gateway = TestGateway::bootstrapped().await;
    let nobody = gateway
        .admin
        .create_user(fixtures::user_request("nobody", vec![]))
        .await
        .unwrap();

    for operation in ProtectedOperation::ALL {
        let decision = gateway
            .auth
            .guard()
            .evaluate(&nobody, operation)
            .await
            .unwrap();
        assert!(matches!(decision, AccessDecision::Deny(_)));
    }
}

#[tokio::test]
async fn test_grant_applies_without_reissuing_tokens() {
    let gateway = TestGateway::bootstrapped().await;
    let viewer_role = seed_viewer_role(&gateway).await;

    gateway
        .admin
        .create_user(fixtures::user_request("alice", vec![]))
        .await
        .unwrap();
    let (_, tokens) = gateway.login("alice", fixtures::TEST_PASSWORD).await;

    let operation = ProtectedOperation::new(Resource::User, Action::Index);

    // Denied before the grant
    let caller = gateway
        .auth
        .resolve_bearer(&tokens.access_token)
        .await
        .unwrap();
    assert!(gateway.auth.guard().authorize(&caller, operation).await.is_err());

    gateway
        .admin
        .sync_user_roles(caller.uuid, &[viewer_role])
        .await
        .unwrap();

    // Same token, next request: allowed
    let caller = gateway
        .auth
        .resolve_bearer(&tokens.access_token)
        .await
        .unwrap();
    gateway
        .auth
        .guard()
        .authorize(&caller, operation)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_revocation_applies_without_reissuing_tokens() {
    let gateway = TestGateway::bootstrapped().await;
    let viewer_role = seed_viewer_role(&gateway).await;

    gateway
        .admin
        .create_user(fixtures::user_request("alice", vec![viewer_role]))
        .await
        .unwrap();
    let (_, tokens) = gateway.login("alice", fixtures::TEST_PASSWORD).await;

    let operation = ProtectedOperation::new(Resource::User, Action::Index);
    let caller = gateway
        .auth
        .resolve_bearer(&tokens.access_token)
        .await
        .unwrap();
    gateway
        .auth
        .guard()
        .authorize(&caller, operation)
        .await
        .unwrap();

    gateway
        .admin
        .sync_user_roles(caller.uuid, &[])
        .await
        .unwrap();

    let caller = gateway
        .auth
        .resolve_bearer(&tokens.access_token)
        .await
        .unwrap();
    assert!(gateway.auth.guard().authorize(&caller, operation).await.is_err());
}

#[tokio::test]
async fn test_deleting_role_revokes_access_from_holders() {
    let gateway = TestGateway::bootstrapped().await;
    let viewer_role = seed_viewer_role(&gateway).await;

    let alice = gateway
        .admin
        .create_user(fixtures::user_request("alice", vec![viewer_role]))
        .await
        .unwrap();

    let operation = ProtectedOperation::new(Resource::User, Action::Index);
    gateway
        .auth
        .guard()
        .authorize(&alice, operation)
        .await
        .unwrap();

    gateway.admin.delete_role(viewer_role).await.unwrap();

    let alice = gateway.admin.get_user(alice.uuid, false).await.unwrap();
    assert!(gateway.auth.guard().authorize(&alice, operation).await.is_err());
}

#[tokio::test]
async fn test_role_permission_sync_changes_effective_permissions() {
    let gateway = TestGateway::bootstrapped().await;
    let viewer_role = seed_viewer_role(&gateway).await;

    let alice = gateway
        .admin
        .create_user(fixtures::user_request("alice", vec![viewer_role]))
        .await
        .unwrap();

    let add_permission = gateway
        .store
        .find_permission_by_name("user-add", "api")
        .await
        .unwrap()
        .unwrap();

    gateway
        .admin
        .sync_role_permissions(viewer_role, &[add_permission.uuid])
        .await
        .unwrap();

    // The role now grants user-add instead of user-index
    let index_op = ProtectedOperation::new(Resource::User, Action::Index);
    let add_op = ProtectedOperation::new(Resource::User, Action::Add);
    assert!(gateway.auth.guard().authorize(&alice, index_op).await.is_err());
    gateway.auth.guard().authorize(&alice, add_op).await.unwrap();
}

#[tokio::test]
async fn test_super_admin_name_carries_no_implicit_power() {
    let gateway = TestGateway::new().await;

    // A role named super-admin, created without bootstrap, grants nothing
    let role = gateway
        .admin
        .create_role(fixtures::role_request(SUPER_ADMIN_ROLE, vec![]))
        .await
        .unwrap();
    let pretender = gateway
        .admin
        .create_user(fixtures::user_request("pretender", vec![role.role.uuid]))
        .await
        .unwrap();

    for operation in ProtectedOperation::ALL {
        assert!(
            gateway
                .auth
                .guard()
                .authorize(&pretender, operation)
                .await
                .is_err(),
            "{} should be denied",
            operation.required_permission()
        );
    }
}

#[tokio::test]
async fn test_detailed_check_names_granting_roles() {
    let gateway = TestGateway::bootstrapped().await;
    let (admin, _) = gateway.login_admin().await;

    let check = gateway
        .auth
        .guard()
        .engine()
        .check_permission_detailed(admin.uuid, "user-delete")
        .await
        .unwrap();

    assert!(check.granted);
    assert!(check.granted_by_roles.iter().any(|r| r == SUPER_ADMIN_ROLE));
}

#[tokio::test]
async fn test_bootstrap_is_idempotent_and_repairs_grants() {
    let gateway = TestGateway::bootstrapped().await;

    // Strip the super-admin role down to nothing
    let role = gateway
        .store
        .find_role_by_name(SUPER_ADMIN_ROLE, "api")
        .await
        .unwrap()
        .unwrap();
    gateway
        .admin
        .sync_role_permissions(role.uuid, &[])
        .await
        .unwrap();

    gateway
        .admin
        .bootstrap(&fixtures::bootstrap_config())
        .await
        .unwrap();

    // Still one super-admin role, holding all 12 permissions again
    let roles = gateway
        .admin
        .list_roles(&RoleFilter::default(), &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(roles.total, 1);
    assert_eq!(roles.items[0].total_permissions, 12);

    let (admin, _) = gateway.login_admin().await;
    for operation in ProtectedOperation::ALL {
        gateway
            .auth
            .guard()
            .authorize(&admin, operation)
            .await
            .unwrap();
    }
}
