//! Bearer-token extractor resolving the acting user.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::User;
use crate::errors::AppError;

/// The persisted user named by the request's bearer token.
///
/// Any failure along the way (missing header, wrong scheme, bad or expired
/// token, unknown subject) is reported as `AppError::Unauthorized`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = auth_header
            .strip_prefix(BEARER_TOKEN_PREFIX)
            .ok_or(AppError::Unauthorized)?;

        let user = state
            .services
            .auth()
            .current_user(token)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "bearer token rejected");
                AppError::Unauthorized
            })?;

        Ok(CurrentUser(user))
    }
}
