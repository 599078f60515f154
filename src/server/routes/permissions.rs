//! Permission management endpoints

use crate::auth::{Action, ProtectedOperation, Resource};
use crate::core::admin::{CreatePermissionRequest, UpdatePermissionRequest};
use crate::server::middleware::request_user;
use crate::server::routes::{ApiResponse, ListQuery, PaginatedResponse};
use crate::server::state::AppState;
use crate::storage::database::PermissionFilter;
use crate::utils::error::GatewayError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

/// Configure permission management routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/permissions")
            .route("", web::get().to(list_permissions))
            .route("", web::post().to(create_permission))
            .route("/name/{name}", web::get().to(get_permission_by_name))
            .route("/{uuid}", web::get().to(get_permission))
            .route("/{uuid}", web::put().to(update_permission))
            .route("/{uuid}", web::delete().to(delete_permission))
            .route("/{uuid}/roles", web::get().to(roles_with_permission)),
    );
}

/// Guard selection for the listing and name-lookup endpoints
///
/// Extracted separately from [`ListQuery`]; query deserialization does not
/// support flattened numeric fields.
#[derive(Debug, Deserialize)]
struct PermissionListQuery {
    /// Restrict to one guard namespace
    #[serde(default)]
    guard: Option<String>,
}

async fn list_permissions(
    state: web::Data<AppState>,
    req: HttpRequest,
    list: web::Query<ListQuery>,
    query: web::Query<PermissionListQuery>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(
            &caller,
            ProtectedOperation::new(Resource::Permission, Action::Index),
        )
        .await?;

    list.validate().map_err(GatewayError::validation)?;

    let filter = PermissionFilter {
        search: list.search.clone(),
        guard: query.guard.clone(),
    };
    let page = state
        .admin
        .list_permissions(&filter, &list.page_request())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(PaginatedResponse::from_page(page))))
}

async fn create_permission(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<CreatePermissionRequest>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(
            &caller,
            ProtectedOperation::new(Resource::Permission, Action::Add),
        )
        .await?;

    let permission = state.admin.create_permission(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(permission)))
}

async fn get_permission(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(
            &caller,
            ProtectedOperation::new(Resource::Permission, Action::Index),
        )
        .await?;

    let permission = state.admin.get_permission(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(permission)))
}

async fn get_permission_by_name(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<PermissionListQuery>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(
            &caller,
            ProtectedOperation::new(Resource::Permission, Action::Index),
        )
        .await?;

    let name = path.into_inner();
    let permission = state
        .admin
        .get_permission_by_name(&name, query.guard.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(permission)))
}

async fn update_permission(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    request: web::Json<UpdatePermissionRequest>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(
            &caller,
            ProtectedOperation::new(Resource::Permission, Action::Edit),
        )
        .await?;

    let permission = state
        .admin
        .update_permission(path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(permission)))
}

async fn delete_permission(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(
            &caller,
            ProtectedOperation::new(Resource::Permission, Action::Delete),
        )
        .await?;

    state.admin.delete_permission(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

async fn roles_with_permission(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, GatewayError> {
    let caller = request_user(&req)?;
    state
        .auth
        .guard()
        .authorize(
            &caller,
            ProtectedOperation::new(Resource::Permission, Action::Index),
        )
        .await?;

    let roles = state.admin.roles_with_permission(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(roles)))
}
