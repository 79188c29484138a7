//! Administrator routes mounted at `/admin`.
//!
//! Every handler here takes [`RequireAdmin`](crate::middleware::rbac::RequireAdmin),
//! so the token and allow-list checks run before any body is parsed.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::{categories, products, settings};
use crate::state::AppState;

/// ```text
/// POST   /products              -> replace_all
/// POST   /products/new          -> create
/// PUT    /products/{id}         -> upsert
/// DELETE /products/{id}         -> delete
///
/// POST   /categories            -> create
/// PUT    /categories/{id}       -> rename
/// DELETE /categories/{id}       -> delete
///
/// PUT    /settings/{key}        -> put
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", post(products::replace_all))
        .route("/products/new", post(products::create))
        .route(
            "/products/{id}",
            put(products::upsert).delete(products::delete),
        )
        .route("/categories", post(categories::create))
        .route(
            "/categories/{id}",
            put(categories::rename).delete(categories::delete),
        )
        .route("/settings/{key}", put(settings::put))
}
