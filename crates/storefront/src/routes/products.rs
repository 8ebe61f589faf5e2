//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tiny_shop_core::ProductId;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::notify::Notice;
use crate::render::PageView;
use crate::state::AppState;

/// Product detail page template.
///
/// Reads the product from `page.detail`, which is always set here.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub page: PageView,
    pub notices: Vec<Notice>,
    pub return_to: String,
}

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<ProductShowTemplate> {
    let page = PageView::render_with_detail(&*state.store().lock().await, id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(ProductShowTemplate {
        page,
        notices: state.notifier().active(),
        return_to: format!("/products/{id}"),
    })
}
