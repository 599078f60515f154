//! Pagination types
//!
//! List reads return stable-ordered pages: the requested sort column first,
//! then UUID ascending as a tie break so pagination stays deterministic
//! across calls.

use serde::{Deserialize, Serialize};

/// Sort column for list operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Sort by identifier
    #[default]
    Uuid,
    /// Sort by name (username for users)
    Name,
    /// Sort by creation timestamp
    CreatedAt,
}

/// Sort direction for list operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending
    #[default]
    Asc,
    /// Descending
    Desc,
}

/// Page request parameters (1-based page index)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number, starting at 1
    pub page: u64,
    /// Items per page
    pub per_page: u64,
    /// Sort column
    #[serde(default)]
    pub sort_by: SortField,
    /// Sort direction
    #[serde(default)]
    pub sort_direction: SortDirection,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            sort_by: SortField::default(),
            sort_direction: SortDirection::default(),
        }
    }
}

impl PageRequest {
    /// Zero-based page index, clamping page 0 to the first page
    pub fn page_index(&self) -> u64 {
        self.page.saturating_sub(1)
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Total number of matching items across all pages
    pub total: u64,
    /// Page number (1-based)
    pub page: u64,
    /// Items per page
    pub per_page: u64,
}

impl<T> Page<T> {
    /// Total number of pages
    pub fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_index_is_zero_based() {
        let request = PageRequest {
            page: 3,
            ..Default::default()
        };
        assert_eq!(request.page_index(), 2);

        let request = PageRequest {
            page: 0,
            ..Default::default()
        };
        assert_eq!(request.page_index(), 0);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page: Page<u32> = Page {
            items: vec![],
            total: 21,
            page: 1,
            per_page: 10,
        };
        assert_eq!(page.total_pages(), 3);
    }
}
