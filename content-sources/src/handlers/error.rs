//! API error types for repository handlers
//!
//! Store failures are classified exactly once, in [`ApiError::from_store`]:
//!
//! | Store kind      | HTTP status | Body message               |
//! |-----------------|-------------|----------------------------|
//! | `NotFound`      | 404         | store message              |
//! | `BadValidation` | 400         | store message              |
//! | `Internal`      | 500         | generic, details only logged |
//!
//! # Example
//!
//! ```rust
//! use content_sources::handlers::{ApiError, ApiErrorKind, ApiOperation};
//! use content_sources::repository::RepositoryStoreError;
//!
//! let error = ApiError::from_store(
//!     ApiOperation::Fetch,
//!     RepositoryStoreError::not_found("Could not find repository with UUID abc"),
//! );
//! assert_eq!(error.kind, ApiErrorKind::NotFound);
//! assert_eq!(error.message, "Could not find repository with UUID abc");
//! ```

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::repository::{RepositoryStoreError, RepositoryStoreErrorKind};

/// Message returned in place of internal error details
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Endpoint operation being performed when the API error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    /// Listing repositories
    List,
    /// Fetching a single repository
    Fetch,
    /// Creating a repository
    Create,
    /// Replacing a repository (PUT)
    Update,
    /// Patching a repository (PATCH)
    PartialUpdate,
    /// Deleting a repository
    Delete,
    /// Resolving the caller identity
    Authenticate,
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Fetch => write!(f, "fetch"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::PartialUpdate => write!(f, "partial_update"),
            Self::Delete => write!(f, "delete"),
            Self::Authenticate => write!(f, "authenticate"),
        }
    }
}

/// Category of API error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Repository was not found for the caller's organization
    NotFound,
    /// Invalid request body, identity or store validation failure
    BadRequest,
    /// Identity header missing
    Unauthorized,
    /// Internal server error
    InternalError,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::BadRequest => write!(f, "bad_request"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::InternalError => write!(f, "internal_error"),
        }
    }
}

impl ApiErrorKind {
    /// Get the HTTP status code for this error kind
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for this error kind
    #[must_use]
    pub fn error_code(&self) -> String {
        self.to_string().to_uppercase()
    }
}

/// Structured API error with operation and tenant context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The operation being performed when the error occurred
    pub operation: ApiOperation,
    /// The category of error
    pub kind: ApiErrorKind,
    /// Message returned to the caller
    pub message: String,
    /// Organization of the caller, when known
    pub org_id: Option<String>,
    /// Underlying cause, logged but never returned
    pub detail: Option<String>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(operation: ApiOperation, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            org_id: None,
            detail: None,
        }
    }

    /// Create a bad request error
    pub fn bad_request(operation: ApiOperation, message: impl Into<String>) -> Self {
        Self::new(operation, ApiErrorKind::BadRequest, message)
    }

    /// Create an unauthorized error
    ///
    /// # Example
    ///
    /// ```rust
    /// use content_sources::handlers::ApiError;
    ///
    /// let error = ApiError::unauthorized("Missing identity header");
    /// assert_eq!(error.kind.status_code().as_u16(), 401);
    /// ```
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ApiOperation::Authenticate, ApiErrorKind::Unauthorized, message)
    }

    /// Create an internal error; `detail` is logged, the caller sees a generic message
    pub fn internal(operation: ApiOperation, detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            ..Self::new(operation, ApiErrorKind::InternalError, INTERNAL_ERROR_MESSAGE)
        }
    }

    /// Classify a store error for the given operation
    ///
    /// # Example
    ///
    /// ```rust
    /// use content_sources::handlers::{ApiError, ApiOperation, INTERNAL_ERROR_MESSAGE};
    /// use content_sources::repository::RepositoryStoreError;
    ///
    /// let error = ApiError::from_store(
    ///     ApiOperation::List,
    ///     RepositoryStoreError::internal("connection refused"),
    /// );
    /// assert_eq!(error.message, INTERNAL_ERROR_MESSAGE);
    /// assert_eq!(error.kind.status_code().as_u16(), 500);
    /// ```
    pub fn from_store(operation: ApiOperation, err: RepositoryStoreError) -> Self {
        match err.kind {
            RepositoryStoreErrorKind::NotFound => {
                Self::new(operation, ApiErrorKind::NotFound, err.message)
            }
            RepositoryStoreErrorKind::BadValidation => {
                Self::new(operation, ApiErrorKind::BadRequest, err.message)
            }
            RepositoryStoreErrorKind::Internal => Self::internal(operation, err.message),
        }
    }

    /// Attach the caller's organization for logging
    #[must_use]
    pub fn with_org(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let Some(ref detail) = self.detail {
            write!(f, " ({})", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Response body for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Message for the caller
    pub error: String,
    /// Uppercase error code, e.g. `NOT_FOUND`
    pub code: String,
    /// HTTP status code
    pub status: u16,
    /// Operation that failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();
        let code = self.kind.error_code();

        if status.is_server_error() {
            tracing::error!(
                operation = %self.operation,
                kind = %self.kind,
                org_id = ?self.org_id,
                detail = ?self.detail,
                "API error: {}", self.message
            );
        } else {
            tracing::warn!(
                operation = %self.operation,
                kind = %self.kind,
                org_id = ?self.org_id,
                "API error: {}", self.message
            );
        }

        let response = ApiErrorResponse {
            error: self.message,
            code,
            status: status.as_u16(),
            operation: Some(self.operation.to_string()),
        };

        (status, Json(response)).into_response()
    }
}
