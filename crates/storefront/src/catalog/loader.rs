//! One-shot catalog load.

use tokio::sync::Mutex;
use tracing::{error, info, instrument};

use super::{CatalogSource, CatalogStatus};
use crate::store::Storefront;

/// Fetch the catalog from `source` and apply it to `store`.
///
/// The store lock is taken twice, to raise the loading indicator and to
/// apply the result, and is never held across the fetch itself. Failures are
/// logged and leave the previous products in place.
#[instrument(skip_all)]
pub async fn load_catalog<S: CatalogSource>(source: &S, store: &Mutex<Storefront>) -> CatalogStatus {
    store.lock().await.catalog_mut().begin_loading();

    let result = source.fetch_products().await;
    match &result {
        Ok(products) => info!(count = products.len(), "catalog loaded"),
        Err(e) => error!(error = %e, "Error fetching products"),
    }

    store.lock().await.catalog_mut().apply(result)
}
