//! Abstractions for page-based pagination.

use std::num::NonZeroU32;

/// Pagination arguments of a list request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(serde::Serialize)]
pub struct Arguments {
    /// Number of the requested page, starting from `1`.
    page: NonZeroU32,

    /// Number of items per page.
    page_size: NonZeroU32,
}

impl Arguments {
    /// Default number of items per page.
    pub const DEFAULT_PAGE_SIZE: u32 = 50;

    /// Maximum number of items per page.
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Creates new [`Arguments`].
    ///
    /// [`None`] is returned if `page` is zero or `page_size` is out of the
    /// `1..=MAX_PAGE_SIZE` range.
    #[must_use]
    pub fn new(page: u32, page_size: u32) -> Option<Self> {
        if page_size > Self::MAX_PAGE_SIZE {
            return None;
        }
        Some(Self {
            page: NonZeroU32::new(page)?,
            page_size: NonZeroU32::new(page_size)?,
        })
    }

    /// Returns the requested page number.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page.get()
    }

    /// Returns the requested number of items per page.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size.get()
    }

    /// Returns the number of items preceding the requested page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page() - 1) * u64::from(self.page_size())
    }
}

impl Default for Arguments {
    fn default() -> Self {
        Self {
            page: NonZeroU32::MIN,
            page_size: NonZeroU32::new(Self::DEFAULT_PAGE_SIZE)
                .unwrap_or(NonZeroU32::MIN),
        }
    }
}

/// Information about a page in a list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct PageInfo {
    /// Current page number.
    pub page: u32,

    /// Number of items per page.
    pub page_size: u32,

    /// Total number of items across all pages.
    pub total_items: u64,

    /// Total number of pages.
    pub total_pages: u32,

    /// Indicator whether there is a next page.
    pub has_next: bool,

    /// Indicator whether there is a previous page.
    pub has_prev: bool,
}

impl PageInfo {
    /// Computes the [`PageInfo`] of the page requested by the provided
    /// [`Arguments`] in a list of `total_items`.
    ///
    /// An empty list still has a single (empty) page.
    #[must_use]
    pub fn new(args: Arguments, total_items: u64) -> Self {
        let page_size = u64::from(args.page_size());
        let total_pages = u32::try_from(total_items.div_ceil(page_size))
            .unwrap_or(u32::MAX)
            .max(1);
        Self {
            page: args.page(),
            page_size: args.page_size(),
            total_items,
            total_pages,
            has_next: args.page() < total_pages,
            has_prev: args.page() > 1,
        }
    }
}
