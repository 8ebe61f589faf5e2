//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                   - Product grid and cart panel
//! GET  /health             - Liveness check
//! GET  /health/ready       - Readiness (catalog loaded)
//!
//! # Products
//! GET  /products/{id}      - Product detail
//!
//! # Cart
//! GET  /cart               - Cart page
//! GET  /cart/count         - Cart count badge (fragment)
//! POST /cart/add/{id}      - Add one unit, redirect back
//! POST /cart/remove/{id}   - Remove the line, redirect back
//! ```
//!
//! Product action paths come from [`crate::render::actions`], the same table
//! the templates read their form targets from.

pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::catalog::CatalogStatus;
use crate::render::actions::{ADD_TO_CART_ROUTE, REMOVE_FROM_CART_ROUTE, SHOW_PRODUCT_ROUTE};
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(cart::show))
        .route("/cart/count", get(cart::count))
        .route(ADD_TO_CART_ROUTE, post(cart::add))
        .route(REMOVE_FROM_CART_ROUTE, post(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route(SHOW_PRODUCT_ROUTE, get(products::show))
        .merge(cart_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable until the catalog has loaded.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().lock().await.catalog().status() {
        CatalogStatus::Ready => StatusCode::OK,
        CatalogStatus::Loading | CatalogStatus::Failed => StatusCode::SERVICE_UNAVAILABLE,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header};
    use tiny_shop_core::{Price, Product, ProductId};
    use tower::ServiceExt;

    use crate::catalog::{Catalog, CatalogError};
    use crate::config::ShopConfig;
    use crate::notify::ADDED_TO_CART;
    use crate::render::CATALOG_ERROR_MESSAGE;
    use crate::storage::MemoryStorage;
    use crate::store::CART_STORAGE_KEY;

    fn product(id: i32, title: &str, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Price::new(price.parse().unwrap()).unwrap(),
            description: format!("All about {title}"),
            image: format!("https://img.example/{id}.jpg"),
            category: "misc".to_string(),
        }
    }

    fn state_with(storage: MemoryStorage, catalog: Option<Catalog>) -> AppState {
        let state = AppState::new(ShopConfig::for_tests(), Box::new(storage));
        if let Some(catalog) = catalog {
            let mut store = state.store().try_lock().unwrap();
            *store.catalog_mut() = catalog;
        }
        state
    }

    fn ready_state() -> AppState {
        state_with(
            MemoryStorage::new(),
            Some(Catalog::ready(vec![
                product(1, "Backpack", "9.99"),
                product(2, "Jacket", "55.5"),
            ])),
        )
    }

    async fn get_page(state: &AppState, uri: &str) -> (StatusCode, String) {
        let response = routes()
            .with_state(state.clone())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn post_form(state: &AppState, uri: &str, form: &str) -> (StatusCode, Option<String>) {
        let response = routes()
            .with_state(state.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(form.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        (response.status(), location)
    }

    #[tokio::test]
    async fn test_home_shows_loading_before_catalog() {
        let state = state_with(MemoryStorage::new(), None);

        let (status, body) = get_page(&state, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Loading products"));
    }

    #[tokio::test]
    async fn test_home_lists_products_with_bound_actions() {
        let state = ready_state();

        let (status, body) = get_page(&state, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Backpack"));
        assert!(body.contains("$55.50"));
        assert!(body.contains(r#"action="/cart/add/1""#));
        assert!(body.contains(r#"href="/products/2""#));
        assert!(body.contains("Your cart is empty"));
    }

    #[tokio::test]
    async fn test_home_shows_error_when_catalog_failed_and_cart_still_works() {
        let stored = r#"[{"id":7,"title":"Saved Mug","price":4.25,"description":"","image":"","quantity":2}]"#;
        let mut catalog = Catalog::new();
        catalog.apply(Err(CatalogError::Status(StatusCode::BAD_GATEWAY)));
        let state = state_with(
            MemoryStorage::with_item(CART_STORAGE_KEY, stored),
            Some(catalog),
        );

        let (_, body) = get_page(&state, "/").await;
        assert!(body.contains(CATALOG_ERROR_MESSAGE));
        assert!(body.contains("Saved Mug"));
        assert!(body.contains("8.50"));

        let (status, _) = post_form(&state, "/cart/remove/7", "return_to=%2F").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert!(state.store().lock().await.cart().is_empty());
    }

    #[tokio::test]
    async fn test_add_redirects_and_shows_notice() {
        let state = ready_state();

        let (status, location) = post_form(&state, "/cart/add/1", "return_to=%2F").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/"));

        post_form(&state, "/cart/add/1", "return_to=%2F").await;

        let (_, body) = get_page(&state, "/").await;
        assert!(body.contains(ADDED_TO_CART));
        assert!(body.contains(r#"<span id="cartCount">2</span>"#));
        assert!(body.contains(r#"<span id="cartTotal">19.98</span>"#));
        assert!(body.contains(r#"action="/cart/remove/1""#));

        let stored = state
            .store()
            .lock()
            .await
            .storage()
            .get_item(CART_STORAGE_KEY)
            .unwrap()
            .unwrap();
        assert!(stored.contains(r#""quantity":2"#));
    }

    #[tokio::test]
    async fn test_add_unknown_product_is_silent() {
        let state = ready_state();

        let (status, _) = post_form(&state, "/cart/add/99", "").await;
        assert_eq!(status, StatusCode::SEE_OTHER);

        assert!(state.store().lock().await.cart().is_empty());
        assert!(state.notifier().active().is_empty());
    }

    #[tokio::test]
    async fn test_remove_then_count() {
        let state = ready_state();
        post_form(&state, "/cart/add/1", "").await;
        post_form(&state, "/cart/add/2", "").await;

        let (_, body) = get_page(&state, "/cart/count").await;
        assert!(body.contains(">2<"));

        let (status, location) =
            post_form(&state, "/cart/remove/2", "return_to=%2Fcart").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/cart"));

        let (_, body) = get_page(&state, "/cart/count").await;
        assert!(body.contains(">1<"));
    }

    #[tokio::test]
    async fn test_offsite_return_to_goes_home() {
        let state = ready_state();

        let (_, location) = post_form(
            &state,
            "/cart/add/1",
            "return_to=https%3A%2F%2Fevil.example%2F",
        )
        .await;

        assert_eq!(location.as_deref(), Some("/"));
    }

    #[tokio::test]
    async fn test_product_detail() {
        let state = ready_state();

        let (status, body) = get_page(&state, "/products/2").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<title>Jacket - Tiny Shop</title>"));
        assert!(body.contains("All about Jacket"));
        assert!(body.contains(r#"action="/cart/add/2""#));

        let (status, _) = get_page(&state, "/products/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get_page(&state, "/products/not-a-number").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cart_page_empty() {
        let state = ready_state();

        let (status, body) = get_page(&state, "/cart").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<span id="cartCount">0</span>"#));
        assert!(body.contains(r#"<span id="cartTotal">0.00</span>"#));
    }

    #[tokio::test]
    async fn test_health_and_readiness() {
        let loading = state_with(MemoryStorage::new(), None);
        assert_eq!(get_page(&loading, "/health").await.1, "ok");
        assert_eq!(
            get_page(&loading, "/health/ready").await.0,
            StatusCode::SERVICE_UNAVAILABLE
        );

        let ready = ready_state();
        assert_eq!(get_page(&ready, "/health/ready").await.0, StatusCode::OK);
    }
}
