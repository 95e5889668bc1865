use crate::constants::DEFAULT_ITEMS_PER_PAGE;
use serde::{Deserialize, Serialize};

/// 1-indexed page cursor with a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub items_per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl Pagination {
    pub fn new(items_per_page: u32) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    /// Change the page size, clamped to at least 1; the current page is kept
    pub fn set_items_per_page(&mut self, items_per_page: u32) {
        self.items_per_page = items_per_page.max(1);
    }

    /// Number of pages needed for `total` rows; never less than 1
    pub fn total_pages(&self, total: u64) -> u32 {
        let pages = total.div_ceil(u64::from(self.items_per_page.max(1)));
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }

    /// Move to `page`, clamped to at least 1
    pub fn go_to(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Next page, or `None` when already on the last page of `total` rows
    pub fn next_page(&self, total: Option<u64>) -> Option<u32> {
        match total {
            Some(total) if self.current_page >= self.total_pages(total) => None,
            _ => Some(self.current_page.saturating_add(1)),
        }
    }

    pub fn previous_page(&self) -> Option<u32> {
        (self.current_page > 1).then(|| self.current_page - 1)
    }
}
