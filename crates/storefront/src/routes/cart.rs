//! Cart route handlers.
//!
//! Add and remove are plain form posts answered with a `303 See Other`
//! back to the page the form was on, so a reload never repeats the action.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tiny_shop_core::ProductId;
use tracing::{info, instrument};
use url::{Position, Url};

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::notify::{ADDED_TO_CART, Notice};
use crate::render::PageView;
use crate::state::AppState;

/// Form data posted by the add and remove buttons.
#[derive(Debug, Default, Deserialize)]
pub struct CartActionForm {
    /// Local path to go back to afterwards.
    pub return_to: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub page: PageView,
    pub notices: Vec<Notice>,
    pub return_to: String,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let page = PageView::render(&*state.store().lock().await);

    CartShowTemplate {
        page,
        notices: state.notifier().active(),
        return_to: "/cart".to_string(),
    }
}

/// Get cart count badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    let count = state.store().lock().await.cart().item_count();
    CartCountTemplate { count }
}

/// Add one unit of a catalog product to the cart.
///
/// Unknown products are ignored without any notice.
#[instrument(skip(state, form))]
pub async fn add(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Form(form): Form<CartActionForm>,
) -> Result<Redirect> {
    let outcome = state.store().lock().await.add_to_cart(id)?;

    if let Some(outcome) = outcome {
        let product_id = id.to_string();
        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));
        info!(%product_id, ?outcome, "added to cart");
        state.notifier().push(ADDED_TO_CART).await;
    }

    Ok(Redirect::to(&return_path(form.return_to.as_deref())))
}

/// Remove a product's line from the cart.
#[instrument(skip(state, form))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Form(form): Form<CartActionForm>,
) -> Result<Redirect> {
    let removed = state.store().lock().await.remove_from_cart(id)?;

    if removed {
        let product_id = id.to_string();
        add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", product_id.as_str())]));
        info!(%product_id, "removed from cart");
    }

    Ok(Redirect::to(&return_path(form.return_to.as_deref())))
}

/// Resolve where to send the user after a cart action.
///
/// The value must be an absolute path that still resolves to this site once
/// joined onto it; control characters and whitespace are refused outright
/// since browsers strip them from `Location`. Anything else goes home.
fn return_path(requested: Option<&str>) -> String {
    requested
        .filter(|path| path.starts_with('/'))
        .filter(|path| !path.chars().any(|c| c.is_control() || c.is_whitespace()))
        .and_then(local_path)
        .unwrap_or_else(|| "/".to_string())
}

/// Path, query and fragment of `path` if it stays on the local origin.
fn local_path(path: &str) -> Option<String> {
    let base = Url::parse("http://localhost/").ok()?;
    let resolved = base.join(path).ok()?;
    (resolved.origin() == base.origin()).then(|| resolved[Position::BeforePath..].to_string())
}
