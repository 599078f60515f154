//! JWT helper utilities

use super::types::JwtHandler;

impl JwtHandler {
    /// Extract the bearer token from an Authorization header value
    pub fn extract_token_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ").map(str::trim)
    }
}
