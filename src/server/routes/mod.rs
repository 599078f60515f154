//! HTTP route modules
//!
//! Route handlers organized by resource. Every handler returns
//! `Result<HttpResponse, GatewayError>`; denials and failures render
//! through the error type's `ResponseError` implementation.

pub mod auth;
pub mod health;
pub mod permissions;
pub mod roles;
pub mod users;

use crate::core::models::{Page, PageRequest, SortDirection, SortField};
use serde::{Deserialize, Serialize};

/// Standard API response structure
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            meta: None,
        }
    }

    /// Create a successful response with metadata
    pub fn success_with_meta(data: T, meta: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            meta: Some(meta),
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    /// Current page number (1-based)
    pub page: u64,
    /// Number of items per page
    pub per_page: u64,
    /// Total number of items
    pub total: u64,
    /// Total number of pages
    pub total_pages: u64,
}

impl PaginationMeta {
    /// Pagination metadata for a result page
    pub fn of<T>(page: &Page<T>) -> Self {
        Self {
            page: page.page,
            per_page: page.per_page,
            total: page.total,
            total_pages: page.total_pages(),
        }
    }
}

/// Paginated response
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    /// Response items
    pub items: Vec<T>,
    /// Pagination metadata
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T>
where
    T: Serialize,
{
    /// Wrap a result page
    pub fn from_page(page: Page<T>) -> Self {
        let pagination = PaginationMeta::of(&page);
        Self {
            items: page.items,
            pagination,
        }
    }
}

/// Query parameters shared by listing endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    /// Page number (1-based)
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    /// Substring filter
    #[serde(default)]
    pub search: Option<String>,
    /// Sort column
    #[serde(default)]
    pub sort_by: SortField,
    /// Sort direction
    #[serde(default)]
    pub sort_direction: SortDirection,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    10
}

impl ListQuery {
    /// Validate query parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.page == 0 {
            return Err("Page must be greater than 0".to_string());
        }
        if self.per_page == 0 {
            return Err("per_page must be greater than 0".to_string());
        }
        if self.per_page > 100 {
            return Err("per_page cannot exceed 100".to_string());
        }
        Ok(())
    }

    /// Convert to a page request
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            per_page: self.per_page,
            sort_by: self.sort_by,
            sort_direction: self.sort_direction,
        }
    }
}
