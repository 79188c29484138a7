use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vitrine_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and implements [`IntoResponse`] to produce
/// consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `vitrine_core`.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::InvalidInput(msg) => {
                    (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::StoreUnavailable(err) => {
                    tracing::error!(error = %err, "Store unavailable");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "STORE_UNAVAILABLE",
                        core.to_string(),
                    )
                }
                CoreError::ReplaceFailed(err) => {
                    tracing::error!(error = %err, "Catalog replace failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "REPLACE_FAILED",
                        core.to_string(),
                    )
                }
            },
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use vitrine_core::store::StoreError;

    use super::*;

    fn status_of(err: CoreError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn core_errors_map_to_statuses() {
        assert_eq!(status_of(CoreError::InvalidInput("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(CoreError::Unauthorized("x".into())), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(CoreError::Forbidden("x".into())), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(CoreError::NotFound {
                entity: "Product",
                id: "p1".into()
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CoreError::ReplaceFailed(StoreError::Commit("boom".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
