//! Action registration table.
//!
//! Rendered markup never carries handler references. After the views for a
//! page are built, an [`ActionTable`] records which actions each rendered
//! product exposes; templates ask the table for the form target of an
//! action, and the router binds the same paths to handlers.

use std::collections::BTreeMap;

use tiny_shop_core::ProductId;

use super::{CartView, ListingView, ProductDetailView};

/// Route pattern for the product detail view.
pub const SHOW_PRODUCT_ROUTE: &str = "/products/{id}";
/// Route pattern for adding a product to the cart.
pub const ADD_TO_CART_ROUTE: &str = "/cart/add/{id}";
/// Route pattern for removing a product from the cart.
pub const REMOVE_FROM_CART_ROUTE: &str = "/cart/remove/{id}";

/// A user action on one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Action {
    ShowProduct(ProductId),
    AddToCart(ProductId),
    RemoveFromCart(ProductId),
}

impl Action {
    /// The product this action targets.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        match self {
            Self::ShowProduct(id) | Self::AddToCart(id) | Self::RemoveFromCart(id) => *id,
        }
    }

    /// HTTP method the action is bound to.
    #[must_use]
    pub const fn method(&self) -> &'static str {
        match self {
            Self::ShowProduct(_) => "GET",
            Self::AddToCart(_) | Self::RemoveFromCart(_) => "POST",
        }
    }

    /// Concrete request path for this action.
    #[must_use]
    pub fn path(&self) -> String {
        let pattern = match self {
            Self::ShowProduct(_) => SHOW_PRODUCT_ROUTE,
            Self::AddToCart(_) => ADD_TO_CART_ROUTE,
            Self::RemoveFromCart(_) => REMOVE_FROM_CART_ROUTE,
        };
        pattern.replace("{id}", &self.product_id().to_string())
    }
}

/// Actions registered for the products on one rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionTable {
    entries: BTreeMap<ProductId, Vec<Action>>,
}

impl ActionTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` under its product. Duplicates are ignored.
    pub fn register(&mut self, action: Action) {
        let actions = self.entries.entry(action.product_id()).or_default();
        if !actions.contains(&action) {
            actions.push(action);
        }
    }

    /// Register detail and add actions for every card in the listing.
    pub fn register_listing(&mut self, listing: &ListingView) {
        for card in &listing.cards {
            self.register(Action::ShowProduct(card.id));
            self.register(Action::AddToCart(card.id));
        }
    }

    /// Register remove actions for every cart line.
    pub fn register_cart(&mut self, cart: &CartView) {
        for item in &cart.items {
            self.register(Action::RemoveFromCart(item.id));
        }
    }

    /// Register the add action shown on a detail view.
    pub fn register_detail(&mut self, detail: &ProductDetailView) {
        self.register(Action::AddToCart(detail.id));
    }

    /// Actions registered for `id`, in registration order.
    #[must_use]
    pub fn actions_for(&self, id: ProductId) -> &[Action] {
        self.entries.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Path for `action`, if it was registered.
    #[must_use]
    pub fn bound_path(&self, action: Action) -> Option<String> {
        self.actions_for(action.product_id())
            .contains(&action)
            .then(|| action.path())
    }

    /// Detail link for `id`, if registered.
    #[must_use]
    pub fn show_path(&self, id: ProductId) -> Option<String> {
        self.bound_path(Action::ShowProduct(id))
    }

    /// Add-to-cart form target for `id`, if registered.
    #[must_use]
    pub fn add_path(&self, id: ProductId) -> Option<String> {
        self.bound_path(Action::AddToCart(id))
    }

    /// Remove-from-cart form target for `id`, if registered.
    #[must_use]
    pub fn remove_path(&self, id: ProductId) -> Option<String> {
        self.bound_path(Action::RemoveFromCart(id))
    }

    /// Number of products with at least one action.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
