//! Catalog product record.

use serde::{Deserialize, Serialize};

use crate::{Price, ProductId};

/// A product as served by the remote catalog source.
///
/// Read-only once fetched. Unknown fields in the source payload (such as
/// `rating`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub category: String,
}
