//! Health check endpoints

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::{HttpResponse, web};
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health_check));
}

/// Service banner
async fn index() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(ServiceInfo {
        service: Cow::Borrowed("identity-gateway"),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
    }))
}

/// Basic health check endpoint
///
/// Pings the database so load balancers see storage outages, not just
/// process liveness.
async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse, GatewayError> {
    debug!("Health check requested");

    state.storage.ping().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(HealthStatus {
        status: Cow::Borrowed("healthy"),
        database: format!("{:?}", state.storage.backend_type()),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
    })))
}

/// Service banner payload
#[derive(Debug, Clone, serde::Serialize)]
struct ServiceInfo {
    service: Cow<'static, str>,
    version: Cow<'static, str>,
}

/// Basic health status
#[derive(Debug, Clone, serde::Serialize)]
struct HealthStatus {
    status: Cow<'static, str>,
    database: String,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: Cow<'static, str>,
}
