//! Fixed-size, 1-indexed pagination.

use serde::Serialize;

/// Items per page for every paginated listing.
pub const PER_PAGE: i64 = 10;

/// A requested page number, always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

impl PageRequest {
    /// Page numbers below 1 are clamped to 1.
    pub fn new(page: i64) -> Self {
        Self { page: page.max(1) }
    }

    pub fn first() -> Self {
        Self { page: 1 }
    }

    /// Parse a `?page=` value; anything unparsable means the first page.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse::<i64>().ok())
            .map_or_else(Self::first, Self::new)
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        PER_PAGE
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(PER_PAGE)
    }
}

/// Metadata describing where a page sits within the full result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub current_page: i64,
    pub per_page: i64,
    pub total: i64,
    pub last_page: i64,
    /// 1-based position of the first item on this page, `None` when empty.
    pub from: Option<i64>,
    pub to: Option<i64>,
}

/// One page of results, serialized as `{ "data": [...], "meta": {...} }`.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, request: PageRequest, total: i64) -> Self {
        let total = total.max(0);
        let last_page = ((total + PER_PAGE - 1) / PER_PAGE).max(1);
        let (from, to) = if data.is_empty() {
            (None, None)
        } else {
            let first = request.offset() + 1;
            (Some(first), Some(first + data.len() as i64 - 1))
        };

        Self {
            data,
            meta: PageMeta {
                current_page: request.page(),
                per_page: PER_PAGE,
                total,
                last_page,
                from,
                to,
            },
        }
    }

    /// An empty page for a query that cannot match anything.
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }
}
