//! Cart engine.
//!
//! The cart is an ordered list of [`CartLine`]s, at most one per product.
//! Lines are snapshots of the product taken on first add; later catalog
//! changes do not touch them.
//!
//! ```text
//! absent ──add──▶ present(1) ──add──▶ present(n + 1)
//!    ▲                │
//!    └─────remove─────┘   (regardless of n)
//! ```

use serde::{Deserialize, Serialize};
use tiny_shop_core::{Price, Product, ProductId};

/// One cart entry: a product snapshot plus a quantity (always at least 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub category: String,
    pub quantity: u32,
}

impl CartLine {
    /// Snapshot `product` into a new line with quantity 1.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            description: product.description.clone(),
            image: product.image.clone(),
            category: product.category.clone(),
            quantity: 1,
        }
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// What [`Cart::add`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended with quantity 1.
    Inserted,
    /// An existing line's quantity went up by one; holds the new quantity.
    Incremented(u32),
}

/// Values derived from the cart on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of quantities over all lines.
    pub item_count: u64,
    /// Sum of price times quantity over all lines.
    pub total: Price,
}

/// The shopping cart.
///
/// Serializes as a bare JSON array of lines, which is the stored format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from stored lines, restoring the invariants.
    ///
    /// Lines with quantity 0 are dropped; repeated ids are merged into the
    /// first occurrence with their quantities summed.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines.into_iter().filter(|l| l.quantity > 0) {
            match cart.line_mut(line.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.id == id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of `product`.
    pub fn add(&mut self, product: &Product) -> AddOutcome {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return AddOutcome::Incremented(line.quantity);
        }

        self.lines.push(CartLine::from_product(product));
        AddOutcome::Inserted
    }

    /// Delete the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.id != id);
        self.lines.len() != before
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Total price across all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Count and total, recomputed from the current lines.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            item_count: self.item_count(),
            total: self.total(),
        }
    }
}
