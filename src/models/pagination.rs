use serde::{Deserialize, Serialize};

/// Largest page a client may request; bigger requests are clamped.
pub const MAX_PAGE_SIZE: u64 = 20;
pub const DEFAULT_PAGE_SIZE: u64 = 10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub total_item_count: u64,
    pub total_pages: u64,
    pub page_size: u64,
    pub current_page: u64,
}

impl PaginationMetadata {
    pub fn new(total_item_count: u64, page_size: u64, current_page: u64) -> Self {
        Self {
            total_item_count,
            total_pages: total_item_count.div_ceil(page_size.max(1)),
            page_size,
            current_page,
        }
    }

    /// Rows to skip before the current page, or `None` when the page lies
    /// beyond anything the database can address.
    pub fn offset(&self) -> Option<u64> {
        self.page_size
            .checked_mul(self.current_page.saturating_sub(1))
            .filter(|offset| *offset <= i64::MAX as u64)
    }
}
