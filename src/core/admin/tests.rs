//! Management service tests

use crate::core::admin::{
    AdminService, CreatePermissionRequest, CreateRoleRequest, CreateUserRequest,
    SUPER_ADMIN_ROLE, UpdatePermissionRequest, UpdateRoleRequest, UpdateUserRequest,
};
use crate::core::models::{PageRequest, User};
use crate::storage::Database;
use crate::storage::database::{PermissionFilter, RoleFilter, UserFilter};
use crate::utils::error::GatewayError;
use std::sync::Arc;
use uuid::Uuid;

async fn setup() -> AdminService {
    let store = Arc::new(Database::new_in_memory().await.unwrap());
    AdminService::new(store, "api".to_string())
}

fn user_request(username: &str) -> CreateUserRequest {
    CreateUserRequest {
        name: "Test User".to_string(),
        username: username.to_string(),
        email: format!("{}@example.com", username),
        phone: None,
        password: "long-enough-pw".to_string(),
        role_uuids: vec![],
    }
}

async fn seed_permission(admin: &AdminService, name: &str) -> Uuid {
    admin
        .create_permission(CreatePermissionRequest {
            name: name.to_string(),
            guard: None,
        })
        .await
        .unwrap()
        .uuid
}

#[tokio::test]
async fn test_create_user_validation() {
    let admin = setup().await;

    let mut request = user_request("alice");
    request.email = "not-an-email".to_string();
    assert!(matches!(
        admin.create_user(request).await.unwrap_err(),
        GatewayError::Validation(_)
    ));

    let mut request = user_request("alice");
    request.password = "short".to_string();
    assert!(matches!(
        admin.create_user(request).await.unwrap_err(),
        GatewayError::Validation(_)
    ));

    let mut request = user_request("alice");
    request.username = "has space".to_string();
    assert!(matches!(
        admin.create_user(request).await.unwrap_err(),
        GatewayError::Validation(_)
    ));
}

#[tokio::test]
async fn test_duplicate_username_spans_deactivated_users() {
    let admin = setup().await;

    let user = admin.create_user(user_request("alice")).await.unwrap();
    admin.delete_user(user.uuid).await.unwrap();

    // The username stays reserved after deactivation
    let err = admin.create_user(user_request("alice")).await.unwrap_err();
    assert!(matches!(err, GatewayError::DuplicateKey(_)));
}

#[tokio::test]
async fn test_create_user_with_unknown_role_is_atomic() {
    let admin = setup().await;

    let mut request = user_request("alice");
    request.role_uuids = vec![Uuid::new_v4()];
    let err = admin.create_user(request).await.unwrap_err();
    assert!(matches!(err, GatewayError::IntegrityConflict(_)));

    // The failed create must not leave a user row behind
    let page = admin
        .list_users(&UserFilter::default(), &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn test_update_user_keeps_roles_when_absent() {
    let admin = setup().await;
    let permission = seed_permission(&admin, "user-index").await;
    let role = admin
        .create_role(CreateRoleRequest {
            name: "viewer".to_string(),
            guard: None,
            permission_uuids: vec![permission],
        })
        .await
        .unwrap();

    let mut request = user_request("alice");
    request.role_uuids = vec![role.role.uuid];
    let user = admin.create_user(request).await.unwrap();

    let updated = admin
        .update_user(
            user.uuid,
            UpdateUserRequest {
                name: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.role_uuids, vec![role.role.uuid]);

    let cleared = admin
        .update_user(
            user.uuid,
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
async fn test_soft_deleted_user_hidden_by_default() {
    let admin = setup().await;
    let user = admin.create_user(user_request("alice")).await.unwrap();

    admin.delete_user(user.uuid).await.unwrap();

    assert!(matches!(
        admin.get_user(user.uuid, false).await.unwrap_err(),
        GatewayError::NotFound(_)
    ));
    let found: User = admin.get_user(user.uuid, true).await.unwrap();
    assert!(found.is_deleted());

    let default_page = admin
        .list_users(&UserFilter::default(), &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(default_page.total, 0);

    let all_page = admin
        .list_users(
            &UserFilter {
                include_deleted: true,
                ..Default::default()
            },
            &PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(all_page.total, 1);

    // Deleting twice is an error, not a no-op
    assert!(matches!(
        admin.delete_user(user.uuid).await.unwrap_err(),
        GatewayError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_role_lifecycle_with_permissions() {
    let admin = setup().await;
    let index = seed_permission(&admin, "user-index").await;
    let edit = seed_permission(&admin, "user-edit").await;

    let role = admin
        .create_role(CreateRoleRequest {
            name: "editor".to_string(),
            guard: None,
            permission_uuids: vec![index, edit],
        })
        .await
        .unwrap();
    assert_eq!(role.total_permissions, 2);

    // Sync down to one permission
    let remaining = admin
        .sync_role_permissions(role.role.uuid, &[index])
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "user-index");

    let updated = admin
        .update_role(
            role.role.uuid,
            UpdateRoleRequest {
                name: Some("reviewer".to_string()),
                permission_uuids: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.role.name, "reviewer");
    assert_eq!(updated.total_permissions, 1);
}

#[tokio::test]
async fn test_lookup_by_name_respects_guard() {
    let admin = setup().await;
    let permission = seed_permission(&admin, "user-index").await;
    let role = admin
        .create_role(CreateRoleRequest {
            name: "viewer".to_string(),
            guard: None,
            permission_uuids: vec![permission],
        })
        .await
        .unwrap();

    let found = admin.get_role_by_name("viewer", None).await.unwrap();
    assert_eq!(found.role.uuid, role.role.uuid);
    assert_eq!(found.total_permissions, 1);

    let found = admin
        .get_permission_by_name("user-index", Some("api"))
        .await
        .unwrap();
    assert_eq!(found.uuid, permission);

    // The same name under another guard does not resolve
    assert!(matches!(
        admin.get_role_by_name("viewer", Some("web")).await.unwrap_err(),
        GatewayError::NotFound(_)
    ));
    assert!(matches!(
        admin.get_permission_by_name("missing", None).await.unwrap_err(),
        GatewayError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_single_assignments_keep_existing_links() {
    let admin = setup().await;
    let index = seed_permission(&admin, "user-index").await;
    let edit = seed_permission(&admin, "user-edit").await;
    let role = admin
        .create_role(CreateRoleRequest {
            name: "editor".to_string(),
            guard: None,
            permission_uuids: vec![index],
        })
        .await
        .unwrap();

    let permissions = admin
        .assign_permission_to_role(role.role.uuid, edit)
        .await
        .unwrap();
    assert_eq!(permissions.len(), 2);

    // Assigning the same permission again is a no-op
    let again = admin
        .assign_permission_to_role(role.role.uuid, edit)
        .await
        .unwrap();
    assert_eq!(again.len(), 2);

    assert!(matches!(
        admin
            .assign_permission_to_role(Uuid::new_v4(), edit)
            .await
            .unwrap_err(),
        GatewayError::NotFound(_)
    ));

    let user = admin.create_user(user_request("alice")).await.unwrap();
    let user = admin
        .assign_role_to_user(user.uuid, role.role.uuid)
        .await
        .unwrap();
    assert_eq!(user.role_uuids, vec![role.role.uuid]);
    assert_eq!(admin.user_permissions(user.uuid).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_role_revokes_from_holders() {
    let admin = setup().await;
    let permission = seed_permission(&admin, "user-index").await;
    let role = admin
        .create_role(CreateRoleRequest {
            name: "viewer".to_string(),
            guard: None,
            permission_uuids: vec![permission],
        })
        .await
        .unwrap();

    let mut request = user_request("alice");
    request.role_uuids = vec![role.role.uuid];
    let user = admin.create_user(request).await.unwrap();

    assert_eq!(admin.user_permissions(user.uuid).await.unwrap().len(), 1);

    admin.delete_role(role.role.uuid).await.unwrap();

    assert!(admin.user_permissions(user.uuid).await.unwrap().is_empty());
    assert!(admin.user_roles(user.uuid).await.unwrap().is_empty());
    // The permission itself survives the role deletion
    admin.get_permission(permission).await.unwrap();
}

#[tokio::test]
async fn test_permission_rename_propagates() {
    let admin = setup().await;
    let permission = seed_permission(&admin, "user-index").await;
    let role = admin
        .create_role(CreateRoleRequest {
            name: "viewer".to_string(),
            guard: None,
            permission_uuids: vec![permission],
        })
        .await
        .unwrap();

    let mut request = user_request("alice");
    request.role_uuids = vec![role.role.uuid];
    let user = admin.create_user(request).await.unwrap();

    admin
        .update_permission(
            permission,
            UpdatePermissionRequest {
                name: "user-view".to_string(),
            },
        )
        .await
        .unwrap();

    let effective = admin.user_permissions(user.uuid).await.unwrap();
    assert_eq!(effective.len(), 1);
    assert_eq!(effective[0].name, "user-view");
}

#[tokio::test]
async fn test_delete_permission_revokes_from_roles() {
    let admin = setup().await;
    let permission = seed_permission(&admin, "user-index").await;
    let role = admin
        .create_role(CreateRoleRequest {
            name: "viewer".to_string(),
            guard: None,
            permission_uuids: vec![permission],
        })
        .await
        .unwrap();

    admin.delete_permission(permission).await.unwrap();

    assert!(admin
        .role_permissions(role.role.uuid)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(admin.get_role(role.role.uuid).await.unwrap().total_permissions, 0);
}

#[tokio::test]
async fn test_duplicate_role_and_permission_names_per_guard() {
    let admin = setup().await;
    seed_permission(&admin, "user-index").await;

    let err = admin
        .create_permission(CreatePermissionRequest {
            name: "user-index".to_string(),
            guard: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::DuplicateKey(_)));

    // Same name under another guard is fine
    admin
        .create_permission(CreatePermissionRequest {
            name: "user-index".to_string(),
            guard: Some("web".to_string()),
        })
        .await
        .unwrap();

    let api_only = admin
        .list_permissions(
            &PermissionFilter {
                guard: Some("api".to_string()),
                ..Default::default()
            },
            &PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(api_only.total, 1);
}

#[tokio::test]
async fn test_bootstrap_is_idempotent() {
    let admin = setup().await;
    let config = crate::config::BootstrapConfig {
        enabled: true,
        admin_username: "superadmin".to_string(),
        admin_email: "superadmin@example.com".to_string(),
        admin_password: Some("bootstrap-pw".to_string()),
    };

    admin.bootstrap(&config).await.unwrap();
    admin.bootstrap(&config).await.unwrap();

    let permissions = admin
        .list_permissions(&PermissionFilter::default(), &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(permissions.total, 12);

    let roles = admin
        .list_roles(&RoleFilter::default(), &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(roles.total, 1);
    assert_eq!(roles.items[0].role.name, SUPER_ADMIN_ROLE);
    assert_eq!(roles.items[0].total_permissions, 12);

    let users = admin
        .list_users(&UserFilter::default(), &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(users.total, 1);
    assert_eq!(users.items[0].username, "superadmin");
}

#[tokio::test]
async fn test_bootstrap_resyncs_super_admin_grants() {
    let admin = setup().await;
    let config = crate::config::BootstrapConfig {
        enabled: true,
        admin_username: "superadmin".to_string(),
        admin_email: "superadmin@example.com".to_string(),
        admin_password: Some("bootstrap-pw".to_string()),
    };
    admin.bootstrap(&config).await.unwrap();

    let role = admin
        .store()
        .find_role_by_name(SUPER_ADMIN_ROLE, "api")
        .await
        .unwrap()
        .unwrap();
    admin.sync_role_permissions(role.uuid, &[]).await.unwrap();

    admin.bootstrap(&config).await.unwrap();
    assert_eq!(admin.get_role(role.uuid).await.unwrap().total_permissions, 12);
}
