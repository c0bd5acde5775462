//! Page number/size to `from`/`size` conversion.
//!
//! `from` + `size` pagination only reaches the first [`WINDOW_CEILING`] hits of
//! a result set. Pages that fall past the window are shrunk or emptied rather
//! than rejected.

/// Deepest result offset reachable without scroll or `search_after`.
pub const WINDOW_CEILING: usize = 10_000;

/// Bounded `from`/`size` pair for a single search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

impl Page {
    /// The whole result window in one request.
    pub const fn full_window() -> Self {
        Self {
            offset: 0,
            limit: WINDOW_CEILING,
        }
    }

    /// An empty page must not be sent to the store.
    pub fn is_empty(&self) -> bool {
        self.limit == 0
    }
}

/// Compute the bounded page for a 1-based `page_number` and `page_size`.
///
/// Both arguments are expected to be at least 1; the HTTP layer validates them.
pub fn page_bounds(page_number: usize, page_size: usize) -> Page {
    let offset = page_number
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(WINDOW_CEILING);
    let limit = page_size.min(WINDOW_CEILING - offset);
    Page { offset, limit }
}
