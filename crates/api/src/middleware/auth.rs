//! Authentication extractor for Axum handlers.
//!
//! Tokens come from the external identity provider; this extractor verifies
//! them and resolves the local user profile. Requests with no profile row or
//! a deactivated profile are rejected even when the token itself is valid.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use fleetlog_core::error::CoreError;
use fleetlog_core::roles::UserRole;
use fleetlog_core::types::UserId;
use fleetlog_db::repositories::UserRepo;

use crate::auth::token::verify_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a Bearer token in the `Authorization`
/// header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The identity-provider subject id (primary key of the profile row).
    pub user_id: UserId,
    /// The user's role from the profile row.
    pub role: UserRole,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = verify_token(token, &state.config.auth.jwt_secret).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Unknown user".into()))
            })?;

        if !user.active {
            return Err(AppError::Core(CoreError::Unauthorized(
                "User is deactivated".into(),
            )));
        }

        let role = UserRole::parse(&user.role).ok_or_else(|| {
            AppError::InternalError(format!("User {} has unknown role '{}'", user.id, user.role))
        })?;

        Ok(AuthUser {
            user_id: user.id,
            role,
        })
    }
}
