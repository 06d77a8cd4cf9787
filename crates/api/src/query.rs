//! Shared query parameter types for API handlers.
//!
//! Extracted through [`crate::extract::QueryParams`], so repeated keys take
//! their last value. Values are kept as raw strings and interpreted in
//! `inkpost_core`, so a malformed `?page=` or id filter never rejects the
//! request.

use inkpost_core::pagination::PageRequest;
use serde::Deserialize;

/// `?page=` for paginated listings.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

impl PageParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::parse(self.page.as_deref())
    }
}

/// `GET /posts` filters plus `?page=`.
#[derive(Debug, Default, Deserialize)]
pub struct PostListParams {
    pub search: Option<String>,
    pub category_id: Option<String>,
    pub user_id: Option<String>,
    pub page: Option<String>,
}

impl PostListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::parse(self.page.as_deref())
    }
}
