//! # content-sources
//!
//! Multi-tenant HTTP service for managing content repository records.
//!
//! ## Features
//!
//! - **CRUD endpoints**: list, fetch, create, full and partial update, delete
//!   under a configurable prefix (default `/api/content-sources/v1`)
//! - **Tenant isolation**: every operation is scoped by the `x-rh-identity` header
//! - **Link-navigable pages**: `{data, meta, links}` collections with
//!   `first`/`last`/`next`/`previous` links
//! - **Pluggable store**: handlers depend on the [`RepositoryStore`] trait
//! - **Middleware stack**: CORS, compression, timeout, body limit, request IDs,
//!   panic recovery
//! - **Graceful shutdown**: SIGTERM and SIGINT
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use content_sources::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let state = AppState::new(config.clone(), Arc::new(InMemoryRepositoryStore::new()));
//!     Server::new(config).serve(app(state)).await
//! }
//! ```
//!
//! [`RepositoryStore`]: repository::RepositoryStore

pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod identity;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repository;
pub mod responses;
pub mod server;
pub mod state;

use axum::{routing::get, Router};

use state::AppState;

/// Build the application router with every route mounted under the configured prefix
///
/// Middleware is applied by [`Server`](server::Server), or explicitly with
/// [`middleware::apply`].
pub fn app(state: AppState) -> Router {
    let routes = Router::new()
        .route("/ping/", get(health::ping))
        .merge(handlers::repositories::routes());

    let prefix = state.config().path_prefix().to_string();
    let router = if prefix.is_empty() {
        Router::new().merge(routes)
    } else {
        Router::new().nest(&prefix, routes)
    };

    router.with_state(state)
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::app;
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{ApiError, ApiErrorKind, ApiOperation, CollectionResponse, ListQuery};
    pub use crate::identity::{Identity, IDENTITY_HEADER};
    pub use crate::models::{RepositoryRequest, RepositoryResponse};
    pub use crate::observability::init_tracing;
    pub use crate::repository::{
        FilterData, InMemoryRepositoryStore, PageWindow, RepositoryStore, RepositoryStoreError,
        RepositoryStoreErrorKind,
    };
    pub use crate::server::Server;
    pub use crate::state::AppState;
}
