//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::notify::Notice;
use crate::render::PageView;
use crate::state::AppState;

/// Home page template: product grid beside the cart panel.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub page: PageView,
    pub notices: Vec<Notice>,
    pub return_to: String,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let page = PageView::render(&*state.store().lock().await);

    HomeTemplate {
        page,
        notices: state.notifier().active(),
        return_to: "/".to_string(),
    }
}
