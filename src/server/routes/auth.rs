//! Authentication endpoints

use crate::auth::TokenPair;
use crate::core::models::User;
use crate::server::middleware::request_user;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Configure authentication routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/refresh-token", web::put().to(refresh))
            .route("/data", web::get().to(auth_data)),
    );
}

/// Login request payload
#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

/// Refresh request payload
#[derive(Debug, Deserialize)]
struct RefreshRequest {
    refresh_token: String,
}

/// Login and refresh response payload
#[derive(Debug, Serialize)]
struct SessionResponse {
    #[serde(flatten)]
    tokens: TokenPair,
    user: User,
}

/// Profile response payload
#[derive(Debug, Serialize)]
struct ProfileResponse {
    #[serde(flatten)]
    user: User,
    roles: Vec<String>,
    permissions: Vec<String>,
}

/// Login with username and password
async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, GatewayError> {
    info!("Login attempt: {}", request.username);

    let (user, tokens) = state.auth.login(&request.username, &request.password).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(SessionResponse { tokens, user })))
}

/// Exchange a refresh token for a fresh token pair
async fn refresh(
    state: web::Data<AppState>,
    request: web::Json<RefreshRequest>,
) -> Result<HttpResponse, GatewayError> {
    let (user, tokens) = state.auth.refresh(&request.refresh_token).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(SessionResponse { tokens, user })))
}

/// Profile of the authenticated caller with its roles and effective
/// permissions
async fn auth_data(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, GatewayError> {
    let user = request_user(&req)?;

    let roles = state
        .admin
        .user_roles(user.uuid)
        .await?
        .into_iter()
        .map(|role| role.name)
        .collect();
    let permissions = state
        .auth
        .effective_permissions(&user)
        .await?
        .into_iter()
        .map(|permission| permission.name)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(ProfileResponse {
        user,
        roles,
        permissions,
    })))
}
