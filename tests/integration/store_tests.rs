//! Identity store integration tests
//!
//! Exercises listing, filtering, pagination, and soft-delete visibility
//! through the management service against a real in-memory database.

use identity_gateway::core::models::{PageRequest, SortDirection, SortField};
use identity_gateway::storage::database::{PermissionFilter, RoleFilter, UserFilter};

use crate::common::{TestGateway, fixtures};

#[tokio::test]
async fn test_user_listing_paginates_deterministically() {
    let gateway = TestGateway::new().await;

    for i in 0..25 {
        gateway
            .admin
            .create_user(fixtures::user_request(&format!("user{:02}", i), vec![]))
            .await
            .unwrap();
    }

    let page_request = PageRequest {
        page: 1,
        per_page: 10,
        sort_by: SortField::Name,
        sort_direction: SortDirection::Asc,
    };
    let first = gateway
        .admin
        .list_users(&UserFilter::default(), &page_request)
        .await
        .unwrap();

    assert_eq!(first.total, 25);
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.total_pages(), 3);
    assert_eq!(first.items[0].username, "user00");

    let last = gateway
        .admin
        .list_users(
            &UserFilter::default(),
            &PageRequest {
                page: 3,
                ..page_request
            },
        )
        .await
        .unwrap();
    assert_eq!(last.items.len(), 5);
    assert_eq!(last.items[4].username, "user24");
}

#[tokio::test]
async fn test_user_search_spans_name_username_and_email() {
    let gateway = TestGateway::new().await;

    gateway
        .admin
        .create_user(fixtures::user_request("alice", vec![]))
        .await
        .unwrap();
    gateway
        .admin
        .create_user(fixtures::user_request("bob", vec![]))
        .await
        .unwrap();

    let filter = UserFilter {
        search: Some("alice@example".to_string()),
        ..Default::default()
    };
    let found = gateway
        .admin
        .list_users(&filter, &PageRequest::default())
        .await
        .unwrap();

    assert_eq!(found.total, 1);
    assert_eq!(found.items[0].username, "alice");
}

#[tokio::test]
async fn test_user_listing_filters_by_role() {
    let gateway = TestGateway::new().await;

    let role = gateway
        .admin
        .create_role(fixtures::role_request("auditor", vec![]))
        .await
        .unwrap();

    gateway
        .admin
        .create_user(fixtures::user_request("alice", vec![role.role.uuid]))
        .await
        .unwrap();
    gateway
        .admin
        .create_user(fixtures::user_request("bob", vec![]))
        .await
        .unwrap();

    let filter = UserFilter {
        role_uuid: Some(role.role.uuid),
        ..Default::default()
    };
    let holders = gateway
        .admin
        .list_users(&filter, &PageRequest::default())
        .await
        .unwrap();

    assert_eq!(holders.total, 1);
    assert_eq!(holders.items[0].username, "alice");
}

#[tokio::test]
async fn test_deactivated_users_hidden_unless_requested() {
    let gateway = TestGateway::new().await;

    let user = gateway
        .admin
        .create_user(fixtures::user_request("alice", vec![]))
        .await
        .unwrap();
    gateway.admin.delete_user(user.uuid).await.unwrap();

    let visible = gateway
        .admin
        .list_users(&UserFilter::default(), &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(visible.total, 0);

    let all = gateway
        .admin
        .list_users(
            &UserFilter {
                include_deleted: true,
                ..Default::default()
            },
            &PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(all.total, 1);
    assert!(all.items[0].is_deleted());

    // Lookup honors the same flag
    assert!(gateway.admin.get_user(user.uuid, false).await.is_err());
    let fetched = gateway.admin.get_user(user.uuid, true).await.unwrap();
    assert_eq!(fetched.uuid, user.uuid);
}

#[tokio::test]
async fn test_role_listing_reports_permission_counts() {
    let gateway = TestGateway::new().await;

    let read = gateway
        .admin
        .create_permission(fixtures::permission_request("report-read"))
        .await
        .unwrap();
    let write = gateway
        .admin
        .create_permission(fixtures::permission_request("report-write"))
        .await
        .unwrap();

    gateway
        .admin
        .create_role(fixtures::role_request("viewer", vec![read.uuid]))
        .await
        .unwrap();
    gateway
        .admin
        .create_role(fixtures::role_request("editor", vec![read.uuid, write.uuid]))
        .await
        .unwrap();

    let page = gateway
        .admin
        .list_roles(
            &RoleFilter::default(),
            &PageRequest {
                sort_by: SortField::Name,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].role.name, "editor");
    assert_eq!(page.items[0].total_permissions, 2);
    assert_eq!(page.items[1].role.name, "viewer");
    assert_eq!(page.items[1].total_permissions, 1);
}

#[tokio::test]
async fn test_guard_filter_separates_namespaces() {
    let gateway = TestGateway::new().await;

    gateway
        .admin
        .create_permission(fixtures::permission_request("report-read"))
        .await
        .unwrap();
    gateway
        .admin
        .create_permission(identity_gateway::core::admin::CreatePermissionRequest {
            name: "report-read".to_string(),
            guard: Some("web".to_string()),
        })
        .await
        .unwrap();

    let web_only = gateway
        .admin
        .list_permissions(
            &PermissionFilter {
                guard: Some("web".to_string()),
                ..Default::default()
            },
            &PageRequest::default(),
        )
        .await
        .unwrap();

    assert_eq!(web_only.total, 1);
    assert_eq!(web_only.items[0].guard, "web");
}
