//! Projection of catalog and cart state into view structs.
//!
//! Every function here is pure: it reads state and returns owned views for
//! the templates. Nothing is cached; each request renders from scratch.

pub mod actions;

use tiny_shop_core::{Product, ProductId};

use crate::cart::{Cart, CartLine};
use crate::catalog::{Catalog, CatalogStatus};
use crate::store::Storefront;

pub use actions::{Action, ActionTable};

/// Static message shown in place of the listing when the catalog fetch fails.
pub const CATALOG_ERROR_MESSAGE: &str = "Failed to load products. Please try again later.";

/// One tile in the product grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: ProductId,
    pub title: String,
    pub price: String,
    pub image: String,
}

/// The product grid area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingView {
    pub loading: bool,
    pub failed: bool,
    pub message: &'static str,
    pub cards: Vec<ProductCardView>,
}

/// Full product view (the detail panel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetailView {
    pub id: ProductId,
    pub title: String,
    pub price: String,
    pub description: String,
    pub image: String,
    pub category: String,
}

/// One line in the cart panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
}

/// The cart panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u64,
    pub total: String,
}

impl CartView {
    /// Whether the panel has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price.to_fixed(),
            image: product.image.clone(),
        }
    }
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price.to_fixed(),
            description: product.description.clone(),
            image: product.image.clone(),
            category: product.category.clone(),
        }
    }
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id,
            title: line.title.clone(),
            image: line.image.clone(),
            price: line.price.to_fixed(),
            quantity: line.quantity,
            line_total: line.subtotal().to_fixed(),
        }
    }
}

/// Render the product grid for the catalog's current status.
#[must_use]
pub fn render_listing(catalog: &Catalog) -> ListingView {
    let status = catalog.status();
    let cards = if status == CatalogStatus::Ready {
        catalog.products().iter().map(ProductCardView::from).collect()
    } else {
        Vec::new()
    };

    ListingView {
        loading: status == CatalogStatus::Loading,
        failed: status == CatalogStatus::Failed,
        message: CATALOG_ERROR_MESSAGE,
        cards,
    }
}

/// Render the cart panel, recomputing count and total.
#[must_use]
pub fn render_cart(cart: &Cart) -> CartView {
    let totals = cart.totals();
    CartView {
        items: cart.lines().iter().map(CartItemView::from).collect(),
        item_count: totals.item_count,
        total: totals.total.to_fixed(),
    }
}

/// Render the detail view for `id`, if the catalog has it.
#[must_use]
pub fn render_detail(catalog: &Catalog, id: ProductId) -> Option<ProductDetailView> {
    catalog.find(id).map(ProductDetailView::from)
}

/// Everything a storefront page shows, plus the actions bound to it.
#[derive(Debug, Clone)]
pub struct PageView {
    pub listing: ListingView,
    pub cart: CartView,
    pub detail: Option<ProductDetailView>,
    pub actions: ActionTable,
}

impl PageView {
    /// Render listing and cart, then build the action table from the views.
    #[must_use]
    pub fn render(store: &Storefront) -> Self {
        let listing = render_listing(store.catalog());
        let cart = render_cart(store.cart());

        let mut actions = ActionTable::new();
        actions.register_listing(&listing);
        actions.register_cart(&cart);

        Self {
            listing,
            cart,
            detail: None,
            actions,
        }
    }

    /// Like [`PageView::render`], plus the detail view for `id`.
    ///
    /// Returns `None` if the product is not in the catalog.
    #[must_use]
    pub fn render_with_detail(store: &Storefront, id: ProductId) -> Option<Self> {
        let detail = render_detail(store.catalog(), id)?;
        let mut page = Self::render(store);
        page.actions.register_detail(&detail);
        page.detail = Some(detail);
        Some(page)
    }
}
