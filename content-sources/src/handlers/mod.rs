//! HTTP layer for repository records
//!
//! - **Endpoints**: [`repositories::routes`] for list, fetch, create, full
//!   and partial update, delete
//! - **Paging**: [`ListQuery`] in, [`CollectionResponse`] out
//! - **Errors**: [`ApiError`], the single place store errors become HTTP statuses

mod error;
mod query;
pub mod repositories;
mod response;

pub use error::{ApiError, ApiErrorKind, ApiErrorResponse, ApiOperation, INTERNAL_ERROR_MESSAGE};
pub use query::ListQuery;
pub use response::{last_offset, CollectionMetadata, CollectionResponse, NavigationLinks};
