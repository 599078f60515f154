//! HTTP server core implementation

use crate::auth::AuthSystem;
use crate::config::{Config, ServerConfig};
use crate::core::admin::AdminService;
use crate::server::middleware::AuthMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::Database;
use crate::utils::error::{GatewayError, Result};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, web};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    ///
    /// Connects to the database, runs migrations, and seeds bootstrap data
    /// when enabled.
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let storage = Arc::new(Database::new(&config.gateway.storage.database).await?);
        let auth = AuthSystem::new(&config.gateway.auth, storage.clone())?;
        let admin = AdminService::new(storage.clone(), config.gateway.auth.guard.clone());

        if config.gateway.auth.bootstrap.enabled {
            admin.bootstrap(&config.gateway.auth.bootstrap).await?;
        }

        let state = AppState::new(config.clone(), auth, admin, storage);

        Ok(Self {
            config: config.gateway.server.clone(),
            state,
        })
    }

    /// Create the Actix-web application
    fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors_config = &state.config.server().cors;
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allow_any_header();

        if cors_config.allow_any_origin() {
            cors = cors.allow_any_origin();
        } else {
            for origin in &cors_config.allowed_origins {
                cors = cors.allowed_origin(origin);
            }
        }
        if let Some(max_age) = cors_config.max_age {
            cors = cors.max_age(max_age);
        }

        App::new()
            .app_data(state)
            .wrap(AuthMiddleware)
            .wrap(cors)
            .wrap(TracingLogger::default())
            .configure(routes::health::configure_routes)
            .configure(routes::auth::configure_routes)
            .configure(routes::users::configure_routes)
            .configure(routes::roles::configure_routes)
            .configure(routes::permissions::configure_routes)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let workers = self.config.workers;

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let mut server = ActixHttpServer::new(move || Self::create_app(state.clone()));
        if let Some(workers) = workers {
            server = server.workers(workers);
        }

        let server = server
            .bind(&bind_addr)
            .map_err(|e| GatewayError::Config(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| GatewayError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
