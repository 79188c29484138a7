//! Administrator gate.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use vitrine_core::auth::VerifiedAdmin;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the allow-listed administrator. Rejects with 401 for a missing
/// or bad token and 403 for any other identity.
///
/// Runs before the request body is read, so a rejected caller never
/// reaches the catalog.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<StatusCode> {
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
pub struct RequireAdmin(pub VerifiedAdmin);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let admin = state.admin_policy.authorize(user.identity)?;
        Ok(RequireAdmin(admin))
    }
}
