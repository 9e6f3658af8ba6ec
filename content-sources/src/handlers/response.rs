//! Collection response with count metadata and navigation links
//!
//! A list page is rendered as:
//!
//! ```json
//! {
//!   "data": [...],
//!   "meta": {"count": 102, "offset": 0, "limit": 10},
//!   "links": {
//!     "first": "/api/content-sources/v1/repositories/?limit=10&offset=0",
//!     "last": "/api/content-sources/v1/repositories/?limit=10&offset=100",
//!     "next": "/api/content-sources/v1/repositories/?limit=10&offset=10"
//!   }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use content_sources::handlers::CollectionResponse;
//! use content_sources::repository::PageWindow;
//!
//! let page = CollectionResponse::new("/repos/", PageWindow::new(10, 0), 102, vec![1, 2, 3]);
//! assert_eq!(page.meta.count, 102);
//! assert_eq!(page.links.last, "/repos/?limit=10&offset=100");
//! assert!(page.links.previous.is_none());
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::repository::PageWindow;

/// Count and window of a collection page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionMetadata {
    /// Total matching records, not the page length
    pub count: u64,
    /// Offset of this page
    pub offset: u64,
    /// Limit of this page
    pub limit: u64,
}

/// Navigation links of a collection page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavigationLinks {
    /// Link to the first page
    pub first: String,
    /// Link to the last page
    pub last: String,
    /// Link to the following page, if any records remain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Link to the preceding page, unless this page starts at 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
}

/// Offset of the final page for `total` records
///
/// # Example
///
/// ```rust
/// use content_sources::handlers::last_offset;
///
/// assert_eq!(last_offset(0, 100), 0);
/// assert_eq!(last_offset(100, 10), 90);
/// assert_eq!(last_offset(102, 10), 100);
/// ```
#[must_use]
pub const fn last_offset(total: u64, limit: u64) -> u64 {
    let limit = if limit == 0 { 1 } else { limit };
    if total == 0 {
        0
    } else {
        ((total - 1) / limit) * limit
    }
}

fn page_link(base_path: &str, limit: u64, offset: u64) -> String {
    format!("{}?limit={}&offset={}", base_path, limit, offset)
}

impl NavigationLinks {
    /// Build the links for `window` over `total` records
    #[must_use]
    pub fn build(base_path: &str, window: PageWindow, total: u64) -> Self {
        let PageWindow { limit, offset } = window;

        let next = (offset.saturating_add(limit) < total)
            .then(|| page_link(base_path, limit, offset + limit));
        let previous =
            (offset > 0).then(|| page_link(base_path, limit, offset.saturating_sub(limit)));

        Self {
            first: page_link(base_path, limit, 0),
            last: page_link(base_path, limit, last_offset(total, limit)),
            next,
            previous,
        }
    }
}

/// One page of a collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionResponse<T> {
    /// Records on this page
    pub data: Vec<T>,
    /// Count and window
    pub meta: CollectionMetadata,
    /// Navigation links
    pub links: NavigationLinks,
}

impl<T> CollectionResponse<T> {
    /// Assemble a page from the requested window and the store's total
    ///
    /// `base_path` is the request path without query string; every link is
    /// `base_path?limit=L&offset=O`.
    pub fn new(base_path: &str, window: PageWindow, total: u64, data: Vec<T>) -> Self {
        Self {
            data,
            meta: CollectionMetadata {
                count: total,
                offset: window.offset,
                limit: window.limit,
            },
            links: NavigationLinks::build(base_path, window, total),
        }
    }
}

impl<T: Serialize> IntoResponse for CollectionResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
