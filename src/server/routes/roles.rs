//! Role management endpoints

use crate::auth::{Action, ProtectedOperation, Resource};
use crate::core::admin::{CreateRoleRequest, UpdateRoleRequest};
use crate::server::middleware::request_user;
use crate::server::routes::{ApiResponse, ListQuery, PaginatedResponse};
use crate::server::state::AppState;
use crate::storage::database::RoleFilter;
use crate::utils::error::GatewayError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

/// Configure role management routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/roles")
            .route("", web::get().to(list_roles))
            .route("", web::post().to(create_role))
            .route("/name/{name}", web::get().to(get_role_by_name))
            .route("/{uuid}", web::get().to(get_role))
            .route("/{uuid}", web::put().to(update_role))
            .route("/{uuid}", web::delete().to(delete_role))
            .route("/{uuid}/permissions", web::get().to(role_permissions))
            .route("/{uuid}/permissions", web::put().to(sync_role_permissions)),
    );
}

/// Guard selection for the listing and name-lookup endpoints
///
/// Extracted separately from [`ListQuery`]; query deserialization does not
/// support flattened numeric fields.
#[derive(Debug, Deserialize)]
struct RoleListQuery {
    /// Restrict to one guard namespace
    #[serde(default)]
    guard: Option<String>,
}

/// Permission sync payload
#[derive(Debug, Deserialize)]
struct SyncPermissionsRequest {
    permission_uuids: Vec<Uuid>,
}

async fn list_roles(
    state: web::Data<AppState>,
    req: HttpRequest,
    list: web::Query<ListQuery>,
    query: web::Query<RoleListQuery>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(&caller, ProtectedOperation::new(Resource::Role, Action::Index))
        .await?;

    list.validate().map_err(GatewayError::validation)?;

    let filter = RoleFilter {
        search: list.search.clone(),
        guard: query.guard.clone(),
    };
    let page = state
        .admin
        .list_roles(&filter, &list.page_request())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(PaginatedResponse::from_page(page))))
}

async fn create_role(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<CreateRoleRequest>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(&caller, ProtectedOperation::new(Resource::Role, Action::Add))
        .await?;

    let role = state.admin.create_role(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(role)))
}

async fn get_role(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(&caller, ProtectedOperation::new(Resource::Role, Action::Index))
        .await?;

    let role = state.admin.get_role(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(role)))
}

async fn get_role_by_name(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<RoleListQuery>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(&caller, ProtectedOperation::new(Resource::Role, Action::Index))
        .await?;

    let name = path.into_inner();
    let role = state
        .admin
        .get_role_by_name(&name, query.guard.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(role)))
}

async fn update_role(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    request: web::Json<UpdateRoleRequest>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(&caller, ProtectedOperation::new(Resource::Role, Action::Edit))
        .await?;

    let role = state
        .admin
        .update_role(path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(role)))
}

async fn delete_role(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(&caller, ProtectedOperation::new(Resource::Role, Action::Delete))
        .await?;

    state.admin.delete_role(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

async fn role_permissions(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(&caller, ProtectedOperation::new(Resource::Role, Action::Index))
        .await?;

    let permissions = state.admin.role_permissions(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(permissions)))
}

async fn sync_role_permissions(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    request: web::Json<SyncPermissionsRequest>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(&caller, ProtectedOperation::new(Resource::Role, Action::Edit))
        .await?;

    let permissions = state
        .admin
        .sync_role_permissions(path.into_inner(), &request.permission_uuids)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(permissions)))
}
