//! Application state shared across handlers

use std::sync::Arc;

use crate::{config::Config, repository::RepositoryStore};

/// Shared state injected into every handler
///
/// The store is a trait object so the binary can run the in-memory store
/// and tests can inject a double.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    store: Arc<dyn RepositoryStore>,
}

impl AppState {
    /// Create state from a configuration and a store
    pub fn new(config: Config, store: Arc<dyn RepositoryStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the repository store
    pub fn store(&self) -> &dyn RepositoryStore {
        self.store.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
