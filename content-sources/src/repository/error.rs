//! Repository store error types
//!
//! Every store failure is tagged with a [`RepositoryStoreErrorKind`] so the
//! HTTP layer can classify it without knowing how the store works.
//!
//! # Example
//!
//! ```rust
//! use content_sources::repository::{RepositoryStoreError, RepositoryStoreErrorKind};
//!
//! let error = RepositoryStoreError::not_found("Could not find repository with UUID abc");
//! assert_eq!(error.kind, RepositoryStoreErrorKind::NotFound);
//! ```

use std::fmt;

/// Category of store error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryStoreErrorKind {
    /// The referenced repository does not exist for this tenant
    NotFound,
    /// Input violates a store-level constraint (blank field, duplicate)
    BadValidation,
    /// Unclassified failure inside the store
    Internal,
}

impl fmt::Display for RepositoryStoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::BadValidation => write!(f, "bad_validation"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

/// Tagged error returned by a [`RepositoryStore`](super::RepositoryStore)
///
/// The message is written for the API caller for `NotFound` and
/// `BadValidation`. For `Internal` it is only ever logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryStoreError {
    /// The category of error
    pub kind: RepositoryStoreErrorKind,
    /// Human-readable error message
    pub message: String,
}

impl RepositoryStoreError {
    /// Create a new store error
    pub fn new(kind: RepositoryStoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Create a "not found" error
    ///
    /// # Example
    ///
    /// ```rust
    /// use content_sources::repository::RepositoryStoreError;
    ///
    /// let error = RepositoryStoreError::not_found("Not found");
    /// assert!(error.is_not_found());
    /// ```
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(RepositoryStoreErrorKind::NotFound, message)
    }

    /// Create a validation error
    ///
    /// # Example
    ///
    /// ```rust
    /// use content_sources::repository::RepositoryStoreError;
    ///
    /// let error = RepositoryStoreError::bad_validation("Already exists");
    /// assert!(error.is_bad_validation());
    /// ```
    pub fn bad_validation(message: impl Into<String>) -> Self {
        Self::new(RepositoryStoreErrorKind::BadValidation, message)
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(RepositoryStoreErrorKind::Internal, message)
    }

    /// Whether the referenced record was absent
    pub fn is_not_found(&self) -> bool {
        self.kind == RepositoryStoreErrorKind::NotFound
    }

    /// Whether the input was rejected by the store
    pub fn is_bad_validation(&self) -> bool {
        self.kind == RepositoryStoreErrorKind::BadValidation
    }
}

impl fmt::Display for RepositoryStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Repository store {} error: {}", self.kind, self.message)
    }
}

impl std::error::Error for RepositoryStoreError {}
