//! Page window and filter types for repository listing
//!
//! # Example
//!
//! ```rust
//! use content_sources::repository::{FilterData, PageWindow};
//!
//! // Absent or malformed values fall back to defaults
//! let window = PageWindow::resolve(Some("10"), None);
//! assert_eq!(window.limit, 10);
//! assert_eq!(window.offset, 0);
//!
//! let filter = FilterData::default().with_arch("x86_64");
//! assert_eq!(filter.arch.as_deref(), Some("x86_64"));
//! ```

/// Page size used when a request does not supply a usable `limit`
pub const DEFAULT_LIMIT: u64 = 100;

/// Offset used when a request does not supply a usable `offset`
pub const DEFAULT_OFFSET: u64 = 0;

/// The `(limit, offset)` pair describing a requested page
///
/// `limit` is always at least 1. There is no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageWindow {
    /// Maximum number of records on the page
    pub limit: u64,
    /// Number of records to skip
    pub offset: u64,
}

impl PageWindow {
    /// Create a window, raising a zero limit to 1
    #[must_use]
    pub const fn new(limit: u64, offset: u64) -> Self {
        let limit = if limit == 0 { 1 } else { limit };
        Self { limit, offset }
    }

    /// Resolve a window from raw query-string values
    ///
    /// Never fails. A limit that is absent or not a positive integer becomes
    /// [`DEFAULT_LIMIT`]; an offset that is absent or not a non-negative
    /// integer becomes [`DEFAULT_OFFSET`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use content_sources::repository::PageWindow;
    ///
    /// assert_eq!(PageWindow::resolve(None, None), PageWindow::new(100, 0));
    /// assert_eq!(PageWindow::resolve(Some("0"), Some("-5")), PageWindow::new(100, 0));
    /// assert_eq!(PageWindow::resolve(Some("25"), Some("50")), PageWindow::new(25, 50));
    /// ```
    #[must_use]
    pub fn resolve(raw_limit: Option<&str>, raw_offset: Option<&str>) -> Self {
        let limit = raw_limit
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|limit| *limit >= 1)
            .unwrap_or(DEFAULT_LIMIT);
        let offset = raw_offset
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(DEFAULT_OFFSET);

        Self { limit, offset }
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

/// Filters applied when listing repositories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterData {
    /// Case-insensitive substring matched against name or URL
    pub search: Option<String>,
    /// Exact distribution architecture
    pub arch: Option<String>,
    /// Accepted distribution versions; a record matches if it has any of them
    pub versions: Vec<String>,
}

impl FilterData {
    /// Build filters from raw query-string values
    ///
    /// Blank values are treated as absent. `version` is a comma-separated list.
    ///
    /// # Example
    ///
    /// ```rust
    /// use content_sources::repository::FilterData;
    ///
    /// let filter = FilterData::from_query(Some("epel"), Some(""), Some("7, 8"));
    /// assert_eq!(filter.search.as_deref(), Some("epel"));
    /// assert!(filter.arch.is_none());
    /// assert_eq!(filter.versions, vec!["7", "8"]);
    /// ```
    #[must_use]
    pub fn from_query(search: Option<&str>, arch: Option<&str>, version: Option<&str>) -> Self {
        let non_blank = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let versions = version
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            search: non_blank(search),
            arch: non_blank(arch),
            versions,
        }
    }

    /// Set the search term
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Set the architecture filter
    #[must_use]
    pub fn with_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = Some(arch.into());
        self
    }

    /// Add an accepted version
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.versions.push(version.into());
        self
    }

    /// Check if any filter is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.arch.is_none() && self.versions.is_empty()
    }
}
