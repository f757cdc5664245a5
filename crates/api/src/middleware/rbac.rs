//! Role-based access control (RBAC) extractors.
//!
//! Extractors wrap [`AuthUser`] and reject requests whose role does not
//! meet the minimum requirement. These cover pure role capability;
//! per-trip ownership decisions stay in `motogiro_core::authz`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use motogiro_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a role that may author trips (`ranger` or `sentinel`).
/// Rejects with 403 Forbidden otherwise.
pub struct RequireRanger(pub AuthUser);

impl FromRequestParts<AppState> for RequireRanger {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.can_create_trips() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Ranger or Sentinel role required".into(),
            )));
        }
        Ok(RequireRanger(user))
    }
}
