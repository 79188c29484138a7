//! Handlers for singleton settings documents.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use vitrine_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /settings/{key}
pub async fn get(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let value = state
        .catalog
        .get_setting(&key)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Setting",
            id: key,
        }))?;
    Ok(Json(value))
}

/// PUT /admin/settings/{key}
///
/// Replaces the whole document stored under `key`.
pub async fn put(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(key): Path<String>,
    Json(value): Json<Value>,
) -> AppResult<impl IntoResponse> {
    state.catalog.put_setting(&admin, &key, &value).await?;
    Ok(Json(json!({ "key": key, "value": value })))
}
