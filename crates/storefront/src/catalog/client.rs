//! HTTP catalog source.

use reqwest::header::ACCEPT;
use tiny_shop_core::Product;
use tracing::{debug, instrument};
use url::Url;

use super::{CatalogError, CatalogSource};

/// Fetches the product list with a single `GET`.
///
/// No pagination, no authentication, and no timeout beyond what the
/// transport applies.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    url: Url,
}

impl CatalogClient {
    /// Create a client for the catalog at `url`.
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// The catalog endpoint.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

impl CatalogSource for CatalogClient {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        // Read as text first so a bad payload can be logged by size
        let body = response.text().await?;
        let products: Vec<Product> = serde_json::from_str(&body).inspect_err(|e| {
            debug!(body_len = body.len(), error = %e, "catalog body did not decode");
        })?;

        debug!(count = products.len(), "catalog fetched");
        Ok(products)
    }
}
