//! Query parameters for the repository list endpoint
//!
//! Paging values are captured as raw strings so malformed input degrades to
//! defaults instead of rejecting the request. Repeated keys keep their first
//! value, see [`ListQuery::from_pairs`].
//!
//! # Example
//!
//! ```rust
//! use content_sources::handlers::ListQuery;
//!
//! let query = ListQuery::default().with_limit("10").with_offset("abc");
//! let window = query.window();
//! assert_eq!(window.limit, 10);
//! assert_eq!(window.offset, 0);
//! ```

use serde::{Deserialize, Serialize};

use crate::repository::{FilterData, PageWindow};

/// Query parameters accepted by `GET /repositories/`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Requested page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,

    /// Number of records to skip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,

    /// Substring matched against name or URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Distribution architecture
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,

    /// Comma-separated distribution versions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ListQuery {
    /// Build a query from decoded `key=value` pairs
    ///
    /// The first occurrence of a key wins and unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "limit" => &mut query.limit,
                "offset" => &mut query.offset,
                "search" => &mut query.search,
                "arch" => &mut query.arch,
                "version" => &mut query.version,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }

    /// Set the raw limit
    #[must_use]
    pub fn with_limit(mut self, limit: impl Into<String>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    /// Set the raw offset
    #[must_use]
    pub fn with_offset(mut self, offset: impl Into<String>) -> Self {
        self.offset = Some(offset.into());
        self
    }

    /// Set the search term
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Resolve the page window, falling back to defaults
    #[must_use]
    pub fn window(&self) -> PageWindow {
        PageWindow::resolve(self.limit.as_deref(), self.offset.as_deref())
    }

    /// Build the list filters
    #[must_use]
    pub fn filter(&self) -> FilterData {
        FilterData::from_query(
            self.search.as_deref(),
            self.arch.as_deref(),
            self.version.as_deref(),
        )
    }
}
