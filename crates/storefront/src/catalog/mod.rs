//! Product catalog: the remote source and the in-memory listing.
//!
//! # Architecture
//!
//! - [`CatalogSource`] abstracts the remote product list; [`CatalogClient`]
//!   is the HTTP implementation
//! - [`Catalog`] holds the fetched products plus the listing status the
//!   renderer needs (loading spinner, error message, grid)
//! - [`load_catalog`] runs one fetch and applies the result
//!
//! The catalog is loaded once per process. There is no refresh, retry or
//! invalidation.

mod client;
mod loader;

use std::future::Future;

use thiserror::Error;
use tiny_shop_core::{Product, ProductId};

pub use client::CatalogClient;
pub use loader::load_catalog;

/// Errors that can occur when fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The source answered with a non-success status.
    #[error("catalog source returned {0}")]
    Status(reqwest::StatusCode),

    /// The body was not a JSON array of products.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A remote list of products.
pub trait CatalogSource: Send + Sync {
    /// Fetch the full product list.
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;
}

/// Where the listing stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogStatus {
    /// A fetch is in flight; show the loading indicator.
    Loading,
    /// The last fetch succeeded.
    Ready,
    /// The last fetch failed; show the static error message.
    Failed,
}

/// The in-memory catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    status: CatalogStatus,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// An empty catalog waiting for its first load.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
            status: CatalogStatus::Loading,
        }
    }

    /// A loaded catalog. Mostly useful in tests.
    #[must_use]
    pub const fn ready(products: Vec<Product>) -> Self {
        Self {
            products,
            status: CatalogStatus::Ready,
        }
    }

    /// Products in source order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Current listing status.
    #[must_use]
    pub const fn status(&self) -> CatalogStatus {
        self.status
    }

    /// Find a product by linear scan.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Mark a fetch as started.
    pub const fn begin_loading(&mut self) {
        self.status = CatalogStatus::Loading;
    }

    /// Apply the outcome of a fetch.
    ///
    /// Success replaces the product list wholesale. Failure leaves the
    /// products untouched. Either way the loading state is cleared.
    pub fn apply(&mut self, result: Result<Vec<Product>, CatalogError>) -> CatalogStatus {
        self.status = match result {
            Ok(products) => {
                self.products = products;
                CatalogStatus::Ready
            }
            Err(_) => CatalogStatus::Failed,
        };
        self.status
    }
}
