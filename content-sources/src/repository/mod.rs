//! Repository store abstraction
//!
//! This module defines the boundary between the HTTP layer and persistence:
//!
//! - **Store contract**: [`RepositoryStore`] with create, update, fetch, list and delete
//! - **Errors**: [`RepositoryStoreError`] tagged NotFound / BadValidation / Internal
//! - **Paging**: [`PageWindow`] and [`FilterData`] for list queries
//! - **Default store**: [`InMemoryRepositoryStore`]
//!
//! # Example
//!
//! ```rust,ignore
//! use content_sources::repository::{
//!     FilterData, InMemoryRepositoryStore, PageWindow, RepositoryStore,
//! };
//!
//! let store = InMemoryRepositoryStore::new();
//! let window = PageWindow::resolve(Some("10"), Some("0"));
//! let (records, total) = store.list("1111", window, &FilterData::default()).await?;
//! ```

mod error;
mod memory;
mod pagination;
mod traits;

pub use error::{RepositoryStoreError, RepositoryStoreErrorKind};
pub use memory::InMemoryRepositoryStore;
pub use pagination::{FilterData, PageWindow, DEFAULT_LIMIT, DEFAULT_OFFSET};
pub use traits::{RepositoryStore, StoreResult};
