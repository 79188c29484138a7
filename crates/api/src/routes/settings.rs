use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Public settings reads mounted at `/settings`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{key}", get(settings::get))
}
