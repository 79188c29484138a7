//! Handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vitrine_core::category::CategoryInput;
use vitrine_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /categories
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = state.catalog.list_categories().await?;
    Ok(Json(categories))
}

/// POST /admin/categories
///
/// Assigns a `cat_<ms>` id and derives the slug from the name.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CategoryInput>,
) -> AppResult<impl IntoResponse> {
    let category = state.catalog.create_category(&admin, input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /admin/categories/{id}
pub async fn rename(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    Json(input): Json<CategoryInput>,
) -> AppResult<impl IntoResponse> {
    let category = state
        .catalog
        .rename_category(&admin, &id, input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(category))
}

/// DELETE /admin/categories/{id}
///
/// Products keep their category slug and fall into `uncategorized`.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.catalog.delete_category(&admin, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
