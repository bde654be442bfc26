//! Offset pagination types.

use serde::{Deserialize, Serialize};

/// Page size used by every list endpoint.
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Largest row offset a page may start at. SQL drivers bind `OFFSET` as a signed
/// 64-bit integer.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Pagination parameters shared across all list endpoints.
///
/// - `per_page`: fixed at [`DEFAULT_PER_PAGE`] for the public API
/// - `page`: 1-based, ≥ 1, and never so large that [`PageRequest::offset`]
///   exceeds [`MAX_OFFSET`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub per_page: u64,
    pub page: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            page: 1,
        }
    }
}

impl PageRequest {
    pub fn new(page: u64) -> Self {
        Self {
            page,
            ..Self::default()
        }
        .clamped()
    }

    /// Parse the raw `page` query value. Anything that is not a positive integer
    /// falls back to the first page.
    pub fn from_query(raw: Option<&str>) -> Self {
        let page = raw.and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(1);
        Self::new(page)
    }

    /// Clamp `per_page` to ≥ 1 and `page` into `1..=` the last page whose offset
    /// still fits in [`MAX_OFFSET`].
    pub fn clamped(self) -> Self {
        let per_page = self.per_page.max(1);
        let max_page = MAX_OFFSET / per_page + 1;
        Self {
            per_page,
            page: self.page.clamp(1, max_page),
        }
    }

    /// Number of rows to skip before this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// Metadata accompanying every list response.
///
/// `from`/`to` are 1-based inclusive positions of the first and last item on the
/// current page, `None` when the page is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub from: Option<u64>,
    pub to: Option<u64>,
}

impl PageMeta {
    pub fn new(request: PageRequest, total: u64, item_count: usize) -> Self {
        let request = request.clamped();
        let last_page = total.div_ceil(request.per_page).max(1);
        let (from, to) = if item_count == 0 {
            (None, None)
        } else {
            let from = request.offset() + 1;
            (Some(from), Some(from + item_count as u64 - 1))
        };
        Self {
            current_page: request.page,
            last_page,
            per_page: request.per_page,
            total,
            from,
            to,
        }
    }
}

/// One page of a filtered, ordered result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        let meta = PageMeta::new(request, total, items.len());
        Self { items, meta }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Slice an already filtered and ordered collection.
    pub fn from_slice(all: &[T], request: PageRequest) -> Self
    where
        T: Clone,
    {
        let request = request.clamped();
        let start = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let items = all
            .iter()
            .skip(start)
            .take(request.per_page as usize)
            .cloned()
            .collect();
        Self::new(items, request, all.len() as u64)
    }
}
