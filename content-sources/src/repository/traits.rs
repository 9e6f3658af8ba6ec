//! Repository store trait definition
//!
//! [`RepositoryStore`] is the capability contract the HTTP layer depends on.
//! It is object-safe (via `async_trait`) so handlers hold an
//! `Arc<dyn RepositoryStore>` and tests can inject a double.
//!
//! # Example
//!
//! ```rust,ignore
//! use content_sources::repository::{PageWindow, FilterData, RepositoryStore};
//!
//! async fn first_page(store: &dyn RepositoryStore, org_id: &str) {
//!     let (records, total) = store
//!         .list(org_id, PageWindow::default(), &FilterData::default())
//!         .await?;
//!     println!("{} of {} repositories", records.len(), total);
//! }
//! ```

use async_trait::async_trait;

use super::error::RepositoryStoreError;
use super::pagination::{FilterData, PageWindow};
use crate::models::{RepositoryRequest, RepositoryResponse};

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, RepositoryStoreError>;

/// Tenant-scoped persistence for repository records
///
/// Every operation takes the caller's organization id; a record belonging to
/// another organization behaves as if it did not exist.
#[async_trait]
pub trait RepositoryStore: Send + Sync {
    /// Create a repository for `org_id`
    ///
    /// # Errors
    ///
    /// `BadValidation` when required fields are blank or the name/URL is
    /// already used within the organization.
    async fn create(
        &self,
        org_id: &str,
        request: RepositoryRequest,
    ) -> StoreResult<RepositoryResponse>;

    /// Apply the set fields of `request` to an existing repository
    ///
    /// # Errors
    ///
    /// `NotFound` when `uuid` does not exist for `org_id`; `BadValidation`
    /// when the change collides with another repository.
    async fn update(
        &self,
        org_id: &str,
        uuid: &str,
        request: RepositoryRequest,
    ) -> StoreResult<RepositoryResponse>;

    /// Fetch a single repository
    ///
    /// # Errors
    ///
    /// `NotFound` when `uuid` does not exist for `org_id`.
    async fn fetch(&self, org_id: &str, uuid: &str) -> StoreResult<RepositoryResponse>;

    /// List one page of repositories plus the total matching `filter`
    ///
    /// The total counts every matching record, not only those in the window.
    async fn list(
        &self,
        org_id: &str,
        window: PageWindow,
        filter: &FilterData,
    ) -> StoreResult<(Vec<RepositoryResponse>, u64)>;

    /// Delete a repository
    ///
    /// # Errors
    ///
    /// `NotFound` when `uuid` does not exist for `org_id`.
    async fn delete(&self, org_id: &str, uuid: &str) -> StoreResult<()>;
}
