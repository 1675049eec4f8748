//! Pagination

use thiserror::Error;

/// Default page number.
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size.
pub const DEFAULT_LIMIT: u32 = 10;

/// Errors constructing a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    ZeroPage,

    /// A page holds at least one entry.
    #[error("limit must be at least 1")]
    ZeroLimit,
}

/// A one-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: u32,
    limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Page {
    /// Create a page request.
    ///
    /// # Errors
    ///
    /// Returns a [`PageError`] when `page` or `limit` is zero.
    pub fn new(page: u32, limit: u32) -> Result<Self, PageError> {
        if page == 0 {
            return Err(PageError::ZeroPage);
        }

        if limit == 0 {
            return Err(PageError::ZeroLimit);
        }

        Ok(Self { page, limit })
    }

    /// Create a page request, filling in defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns a [`PageError`] when a supplied value is zero.
    pub fn with_defaults(page: Option<u32>, limit: Option<u32>) -> Result<Self, PageError> {
        Self::new(page.unwrap_or(DEFAULT_PAGE), limit.unwrap_or(DEFAULT_LIMIT))
    }

    /// One-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Page size.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of entries to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// Number of pages needed for `total` entries.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.limit))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_fill_missing_values() -> TestResult {
        let page = Page::with_defaults(None, None)?;

        assert_eq!(page, Page::default());
        assert_eq!(page.offset(), 0);

        Ok(())
    }

    #[test]
    fn zero_values_are_rejected() {
        assert_eq!(Page::new(0, 10), Err(PageError::ZeroPage));
        assert_eq!(Page::with_defaults(None, Some(0)), Err(PageError::ZeroLimit));
    }

    #[test]
    fn offset_skips_previous_pages() -> TestResult {
        assert_eq!(Page::new(3, 8)?.offset(), 16);

        Ok(())
    }

    #[test]
    fn total_pages_rounds_up() -> TestResult {
        let page = Page::new(1, 10)?;

        assert_eq!(page.total_pages(0), 0);
        assert_eq!(page.total_pages(10), 1);
        assert_eq!(page.total_pages(11), 2);

        Ok(())
    }
}
