//! Error handling for the Gateway
//!
//! This module defines all error types used throughout the gateway.

#![allow(missing_docs)]

use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for the Gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the Gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JWT errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Crypto errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// No resolved caller identity on a protected operation
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Caller lacks the permission required by the operation
    #[error("Insufficient permission: {0}")]
    InsufficientPermission(String),

    /// Missing or malformed required field
    #[error("Validation error: {0}")]
    Validation(String),

    /// Uniqueness invariant violated on create/update
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Assignment references a UUID that does not resolve
    #[error("Integrity conflict: {0}")]
    IntegrityConflict(String),

    /// Lookup by UUID/name yielded no row
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for GatewayError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            GatewayError::Config(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                self.to_string(),
            ),
            GatewayError::Database(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "Database operation failed".to_string(),
            ),
            GatewayError::Jwt(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "JWT_ERROR",
                "Invalid or expired token".to_string(),
            ),
            GatewayError::Unauthenticated(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                self.to_string(),
            ),
            GatewayError::InsufficientPermission(_) => (
                actix_web::http::StatusCode::FORBIDDEN,
                "INSUFFICIENT_PERMISSION",
                self.to_string(),
            ),
            GatewayError::Validation(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                self.to_string(),
            ),
            GatewayError::DuplicateKey(_) => (
                actix_web::http::StatusCode::CONFLICT,
                "DUPLICATE_KEY",
                self.to_string(),
            ),
            GatewayError::IntegrityConflict(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "INTEGRITY_CONFLICT",
                self.to_string(),
            ),
            GatewayError::NotFound(_) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                self.to_string(),
            ),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
                request_id: None, // This should be set by middleware
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
    pub request_id: Option<String>,
}

/// Helper functions for creating specific errors
impl GatewayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn unauthenticated<S: Into<String>>(message: S) -> Self {
        Self::Unauthenticated(message.into())
    }

    pub fn insufficient_permission<S: Into<String>>(message: S) -> Self {
        Self::InsufficientPermission(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn duplicate_key<S: Into<String>>(message: S) -> Self {
        Self::DuplicateKey(message.into())
    }

    pub fn integrity_conflict<S: Into<String>>(message: S) -> Self {
        Self::IntegrityConflict(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn crypto<S: Into<String>>(message: S) -> Self {
        Self::Crypto(message.into())
    }

    /// Whether the error is a client fault (4xx) rather than a server fault
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated(_)
                | Self::InsufficientPermission(_)
                | Self::Validation(_)
                | Self::DuplicateKey(_)
                | Self::IntegrityConflict(_)
                | Self::NotFound(_)
        )
    }
}
