pub mod admin;
pub mod categories;
pub mod health;
pub mod products;
pub mod settings;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the catalog route tree.
///
/// Route hierarchy:
///
/// ```text
/// /products                                 storefront listing (public)
/// /products/{id}                            product detail (public)
/// /catalog                                  products grouped by category (public)
/// /categories                               category list (public)
/// /settings/{key}                           settings document (public)
///
/// /admin/products                           replace the whole catalog
/// /admin/products/new                       create one product
/// /admin/products/{id}                      overwrite, delete
/// /admin/categories                         create
/// /admin/categories/{id}                    rename, delete
/// /admin/settings/{key}                     overwrite settings document
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .route("/catalog", get(handlers::products::grouped))
        .nest("/categories", categories::router())
        .nest("/settings", settings::router())
        .nest("/admin", admin::router())
}
