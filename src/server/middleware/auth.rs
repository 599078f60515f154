//! Authentication middleware
//!
//! Resolves the bearer token of every protected request to its user and
//! stores the user in the request extensions. Handlers read it back with
//! [`request_user`] and run their own authorization check against the
//! access guard.

use crate::core::models::User;
use crate::server::middleware::helpers::{extract_bearer_token, is_public_route};
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{HttpMessage, HttpRequest, web};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, warn};

/// Auth middleware for Actix-web
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

/// Service implementation for auth middleware
pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let path = req.path().to_string();

        if is_public_route(&path) {
            return Box::pin(self.service.call(req));
        }

        let token = extract_bearer_token(req.headers());
        let app_state = req.app_data::<web::Data<AppState>>().cloned();
        let (req, payload) = req.into_parts();

        let Some(state) = app_state else {
            return Box::pin(async move {
                Err(GatewayError::internal("Application state not configured").into())
            });
        };

        let service_fut = {
            let req = ServiceRequest::from_parts(req.clone(), payload);
            self.service.call(req)
        };

        Box::pin(async move {
            let Some(token) = token else {
                debug!("Missing bearer token for protected route: {}", path);
                return Err(GatewayError::unauthenticated("Missing bearer token").into());
            };

            match state.auth.resolve_bearer(&token).await {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                    service_fut.await
                }
                Err(e) => {
                    warn!("Bearer token rejected for {}: {}", path, e);
                    Err(e.into())
                }
            }
        })
    }
}

/// Read the authenticated user resolved by the middleware
pub fn request_user(req: &HttpRequest) -> Result<User, GatewayError> {
    req.extensions()
        .get::<User>()
        .cloned()
        .ok_or_else(|| GatewayError::unauthenticated("Missing bearer token"))
}
