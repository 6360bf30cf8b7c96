//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Rows shown per page in the admin directory
pub const LISTING_PAGE_SIZE: u32 = 10;

/// Maximum number of numbered page buttons offered at once
pub const PAGE_BUTTON_LIMIT: u32 = 5;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: LISTING_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Zero-based offset of the first row on this page
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1).saturating_mul(self.per_page as usize)
    }
}

/// Paginated response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
    /// 1-based index of the first row shown, 0 when nothing is shown
    pub showing_from: u64,
    /// 1-based index of the last row shown
    pub showing_to: u64,
    /// Numbered page buttons to offer around the current page
    pub page_buttons: Vec<u32>,
}

impl PaginationMeta {
    pub fn new(pagination: Pagination, total_items: usize) -> Self {
        let total_pages = page_count(total_items, pagination.per_page);
        let offset = pagination.offset() as u64;
        let total = total_items as u64;
        let showing_to = (offset + pagination.per_page as u64).min(total);
        let showing_from = if offset < showing_to { offset + 1 } else { 0 };

        Self {
            page: pagination.page,
            per_page: pagination.per_page,
            total_items: total,
            total_pages,
            showing_from,
            showing_to,
            page_buttons: page_buttons(pagination.page, total_pages),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.total_pages > 0 && self.page < self.total_pages
    }
}

/// Number of pages needed to show `total_items`, rounding up
pub fn page_count(total_items: usize, per_page: u32) -> u32 {
    let per_page = per_page.max(1) as usize;
    total_items.div_ceil(per_page) as u32
}

/// Clamp a requested page into `1..=max(total_pages, 1)`
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// Up to five page numbers centred on the current page
///
/// Shows every page when there are at most five, otherwise slides a
/// five-wide window that sticks to either end. Out-of-range pages are
/// treated as the nearest existing page.
pub fn page_buttons(current: u32, total_pages: u32) -> Vec<u32> {
    let shown = total_pages.min(PAGE_BUTTON_LIMIT);
    let current = clamp_page(current, total_pages);
    let first = if total_pages <= PAGE_BUTTON_LIMIT || current <= 3 {
        1
    } else if current >= total_pages - 2 {
        total_pages - (PAGE_BUTTON_LIMIT - 1)
    } else {
        current - 2
    };
    (first..first + shown).collect()
}

/// Cut one page out of an already filtered slice
pub fn paginate<T: Clone>(items: &[T], pagination: Pagination) -> PaginatedResponse<T> {
    let data = items
        .iter()
        .skip(pagination.offset())
        .take(pagination.per_page as usize)
        .cloned()
        .collect();

    PaginatedResponse {
        data,
        pagination: PaginationMeta::new(pagination, items.len()),
    }
}
