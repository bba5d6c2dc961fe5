use crate::models::PagedResult;

/// Server-side bounds for page sizes
#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

/// A clamped page selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Clamp caller input into a valid request
    ///
    /// Missing values fall back to page 1 and the default size. Out-of-range
    /// values are pulled to the nearest bound instead of being rejected.
    pub fn clamp(page: Option<i64>, page_size: Option<i64>, limits: &PageLimits) -> Self {
        let max = limits.max_page_size.max(1);
        let page = page.unwrap_or(1).clamp(1, u32::MAX as i64) as u32;
        // Nearest bound, not the default: limit=0 gives 1 and limit=1000 gives max
        let page_size = page_size
            .unwrap_or(limits.default_page_size as i64)
            .clamp(1, max as i64) as u32;

        Self { page, page_size }
    }

    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }

    pub fn limit(&self) -> u64 {
        self.page_size as u64
    }

    /// Total page count; an empty result still has one (empty) page
    pub fn total_pages(&self, total: u64) -> u32 {
        let pages = total.div_ceil(self.page_size as u64).max(1);
        pages.min(u32::MAX as u64) as u32
    }

    pub fn into_result<T>(self, items: Vec<T>, total: u64) -> PagedResult<T> {
        PagedResult {
            items,
            page: self.page,
            page_size: self.page_size,
            total,
            total_pages: self.total_pages(total),
        }
    }
}
