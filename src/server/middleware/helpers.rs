//! Helper functions for middleware

use actix_web::http::header::HeaderMap;

/// Extract the bearer token from request headers
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers.get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;
    auth_str
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

/// Check if a route is public (doesn't require authentication)
pub fn is_public_route(path: &str) -> bool {
    const PUBLIC_ROUTES: &[&str] = &["/health", "/auth/login", "/auth/refresh-token"];

    path == "/" || PUBLIC_ROUTES.iter().any(|&route| path.starts_with(route))
}
