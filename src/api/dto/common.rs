//! Common API DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::types::pagination::PageResult;

/// Standard API response envelope
///
/// Every REST endpoint wraps its payload in this shape.
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// The payload; `null` on error
    pub data: Option<T>,
    /// Error description; `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Query parameters shared by every list endpoint
#[derive(Debug, Default, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct ListParams {
    /// Page number (1-based). Defaults to 1
    pub page: Option<usize>,
    /// Items per page (1–100). Defaults to 10
    pub limit: Option<usize>,
    /// Case-insensitive search term applied before pagination
    pub search: Option<String>,
}

/// One page of a list endpoint
///
/// Carries the slice of items plus the navigation metadata the dashboard
/// needs to render pagers and "showing X–Y of Z" captions.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    /// Items on the current page
    pub items: Vec<T>,
    /// Total number of items across all pages (after search filtering)
    pub total_items: usize,
    /// Current page (1-based)
    pub page: usize,
    /// Page size used
    pub limit: usize,
    /// Total number of pages; 0 when the collection is empty
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    /// 1-based index of the first item on this page; 0 when empty
    pub display_start_index: usize,
    /// 1-based index of the last item on this page
    pub display_end_index: usize,
}

impl<T> PaginatedResponse<T> {
    pub fn from_page(page: PageResult<T>, limit: usize) -> Self {
        Self {
            items: page.page_items,
            total_items: page.total_items,
            page: page.current_page,
            limit,
            total_pages: page.total_pages,
            has_next_page: page.has_next_page,
            has_previous_page: page.has_previous_page,
            display_start_index: page.display_start_index,
            display_end_index: page.display_end_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::pagination;

    #[test]
    fn paginated_response_carries_page_metadata() {
        let items: Vec<i32> = (1..=23).collect();
        let page = pagination::compute(&items, 10, 3);
        let resp = PaginatedResponse::from_page(page, 10);

        assert_eq!(resp.items, vec![21, 22, 23]);
        assert_eq!(resp.total_items, 23);
        assert_eq!(resp.total_pages, 3);
        assert_eq!(resp.display_start_index, 21);
        assert_eq!(resp.display_end_index, 23);
        assert!(!resp.has_next_page);
        assert!(resp.has_previous_page);
    }
}
