//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::catalog::{CatalogClient, CatalogStatus, load_catalog};
use crate::config::ShopConfig;
use crate::notify::Notifier;
use crate::storage::LocalStorage;
use crate::store::Storefront;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The [`Storefront`] sits behind
/// a single mutex, so cart mutations never interleave.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ShopConfig,
    store: Mutex<Storefront>,
    catalog: CatalogClient,
    notifier: Notifier,
}

impl AppState {
    /// Create the application state, restoring the cart from `storage`.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `storage` - Durable storage holding the cart
    #[must_use]
    pub fn new(config: ShopConfig, storage: Box<dyn LocalStorage>) -> Self {
        let store = Storefront::restore(storage);
        let catalog = CatalogClient::new(config.catalog_url.clone());
        let notifier = Notifier::new(config.notification_ttl);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store: Mutex::new(store),
                catalog,
                notifier,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &ShopConfig {
        &self.inner.config
    }

    /// The catalog and cart owner.
    #[must_use]
    pub fn store(&self) -> &Mutex<Storefront> {
        &self.inner.store
    }

    /// Get a reference to the remote catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Transient notices.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    /// Fetch the catalog once, in the background.
    ///
    /// Returns immediately; pages show the loading indicator until the fetch
    /// completes.
    pub fn start_catalog_load(&self) -> tokio::task::JoinHandle<CatalogStatus> {
        let state = self.clone();
        tokio::spawn(async move { load_catalog(state.catalog(), state.store()).await })
    }
}
