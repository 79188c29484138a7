use axum::routing::get;
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Public category listing mounted at `/categories`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(categories::list))
}
