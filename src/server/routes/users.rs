//! User management endpoints

use crate::auth::{Action, ProtectedOperation, Resource};
use crate::core::admin::{CreateUserRequest, UpdateUserRequest};
use crate::server::middleware::request_user;
use crate::server::routes::{ApiResponse, ListQuery, PaginatedResponse};
use crate::server::state::AppState;
use crate::storage::database::UserFilter;
use crate::utils::error::GatewayError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

/// Configure user management routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("", web::post().to(create_user))
            .route("/{uuid}", web::get().to(get_user))
            .route("/{uuid}", web::put().to(update_user))
            .route("/{uuid}", web::delete().to(delete_user))
            .route("/{uuid}/roles", web::get().to(user_roles))
            .route("/{uuid}/roles", web::put().to(sync_user_roles))
            .route("/{uuid}/permissions", web::get().to(user_permissions)),
    );
}

/// Listing parameters specific to users
///
/// Extracted separately from [`ListQuery`]; query deserialization does not
/// support flattened numeric fields.
#[derive(Debug, Deserialize)]
struct UserListQuery {
    /// Only users holding this role
    #[serde(default)]
    role_uuid: Option<Uuid>,
    /// Include soft-deleted users
    #[serde(default)]
    include_deleted: bool,
}

/// Lookup parameters for a single user
#[derive(Debug, Deserialize)]
struct UserGetQuery {
    /// Include soft-deleted users
    #[serde(default)]
    include_deleted: bool,
}

/// Role sync payload
#[derive(Debug, Deserialize)]
struct SyncRolesRequest {
    role_uuids: Vec<Uuid>,
}

async fn list_users(
    state: web::Data<AppState>,
    req: HttpRequest,
    list: web::Query<ListQuery>,
    query: web::Query<UserListQuery>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(&caller, ProtectedOperation::new(Resource::User, Action::Index))
        .await?;

    list.validate().map_err(GatewayError::validation)?;

    let filter = UserFilter {
        search: list.search.clone(),
        role_uuid: query.role_uuid,
        include_deleted: query.include_deleted,
    };
    let page = state
        .admin
        .list_users(&filter, &list.page_request())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(PaginatedResponse::from_page(page))))
}

async fn create_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(&caller, ProtectedOperation::new(Resource::User, Action::Add))
        .await?;

    let user = state.admin.create_user(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(user)))
}

async fn get_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    query: web::Query<UserGetQuery>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(&caller, ProtectedOperation::new(Resource::User, Action::Index))
        .await?;

    let user = state
        .admin
        .get_user(path.into_inner(), query.include_deleted)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
}

async fn update_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    request: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(&caller, ProtectedOperation::new(Resource::User, Action::Edit))
        .await?;

    let user = state
        .admin
        .update_user(path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
}

async fn delete_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(&caller, ProtectedOperation::new(Resource::User, Action::Delete))
        .await?;

    state.admin.delete_user(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

async fn user_roles(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(&caller, ProtectedOperation::new(Resource::User, Action::Index))
        .await?;

    let roles = state.admin.user_roles(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(roles)))
}

async fn sync_user_roles(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    request: web::Json<SyncRolesRequest>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(&caller, ProtectedOperation::new(Resource::User, Action::Edit))
        .await?;

    let user = state
        .admin
        .sync_user_roles(path.into_inner(), &request.role_uuids)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
}

async fn user_permissions(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(&caller, ProtectedOperation::new(Resource::User, Action::Index))
        .await?;

    let permissions = state.admin.user_permissions(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(permissions)))
}
