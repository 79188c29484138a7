//! Handlers for the storefront `/products` listing and the admin product
//! editor, including the full-catalog replace.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use vitrine_core::error::CoreError;
use vitrine_core::product::{ProductDraft, ProductOrder};
use vitrine_core::sync::ReplaceOutcome;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ProductListParams;
use crate::state::AppState;

/// Body returned by a successful replace-all.
#[derive(Debug, Serialize)]
pub struct ReplaceResponse {
    pub success: bool,
    #[serde(flatten)]
    pub outcome: ReplaceOutcome,
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /products?category=&order=
///
/// The unfiltered, name-ordered listing is served from the catalog cache.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> AppResult<Response> {
    if let Some(category) = params.category.as_deref() {
        let products = state.catalog.list_by_category(category).await?;
        return Ok(Json(products).into_response());
    }

    if params.order == ProductOrder::Name {
        let products = state.cache.products(&state.catalog).await?;
        return Ok(Json(products.as_slice()).into_response());
    }

    let products = state.catalog.list_all(params.order).await?;
    Ok(Json(products).into_response())
}

/// GET /products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let product = state
        .catalog
        .get_by_id(&id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(product))
}

/// GET /catalog
///
/// Products grouped by category, dangling ones under `uncategorized`.
pub async fn grouped(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let groups = state.catalog.grouped().await?;
    Ok(Json(groups))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// POST /admin/products
///
/// Replace the whole catalog with `{ "products": [...] }`. Records without
/// an id or name are skipped and listed in the response.
pub async fn replace_all(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let products = body.get("products").unwrap_or(&Value::Null);
    let outcome = state.catalog.replace_all(&admin, products).await?;
    Ok(Json(ReplaceResponse {
        success: true,
        outcome,
    }))
}

/// POST /admin/products/new
///
/// Create a product, generating a `prod_<ms>` id when the body has none.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(draft): Json<ProductDraft>,
) -> AppResult<impl IntoResponse> {
    let product = state.catalog.create_product(&admin, draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /admin/products/{id}
///
/// Full-document overwrite from the per-row editor; creates if absent.
pub async fn upsert(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    Json(draft): Json<ProductDraft>,
) -> AppResult<impl IntoResponse> {
    let product = state.catalog.save_product(&admin, &id, draft).await?;
    Ok(Json(product))
}

/// DELETE /admin/products/{id}
///
/// Physical delete. Missing ids still answer 204.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.catalog.delete_one(&admin, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
