//! Public product routes mounted at `/products`.

use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// ```text
/// GET /                 -> list (?category=&order=)
/// GET /{id}             -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list))
        .route("/{id}", get(products::get_by_id))
}
