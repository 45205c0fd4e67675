//! Application state shared across handlers.

use std::sync::Arc;

use crate::assistant::ClaudeClient;
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the read-only catalog, and the model client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    claude: ClaudeClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The catalog is loaded before this point; it is read-only for the
    /// process lifetime, so no locking is needed.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        let claude = ClaudeClient::new(&config.claude);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                claude,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the Claude API client.
    #[must_use]
    pub fn claude(&self) -> &ClaudeClient {
        &self.inner.claude
    }
}
