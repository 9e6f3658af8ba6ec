//! Success responses with non-200 status codes
//!
//! - **201 Created** for `POST /repositories/`, with a `Location` header
//! - **204 No Content** for `DELETE /repositories/{uuid}`

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// HTTP 201 Created response
///
/// # Example
///
/// ```rust,ignore
/// use content_sources::responses::Created;
///
/// async fn create() -> Created<RepositoryResponse> {
///     Created::new(record).with_location("/api/content-sources/v1/repositories/abc")
/// }
/// ```
#[derive(Debug)]
pub struct Created<T> {
    data: T,
    location: Option<String>,
}

impl<T> Created<T> {
    /// Create a new 201 response carrying `data`
    pub fn new(data: T) -> Self {
        Self {
            data,
            location: None,
        }
    }

    /// Point the `Location` header at the created resource
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::CREATED, Json(&self.data)).into_response();

        // Silently skip a location that is not a valid header value
        if let Some(value) = self
            .location
            .and_then(|location| HeaderValue::from_str(&location).ok())
        {
            response.headers_mut().insert(header::LOCATION, value);
        }

        response
    }
}

/// HTTP 204 No Content response
#[derive(Debug, Clone, Copy)]
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}
