//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{CurrentUser, ValidatedForm};
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::TokenResponse;

/// OAuth2-style password form. `username` carries the account email.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TokenRequest {
    #[schema(example = "user@example.com")]
    pub username: String,
    #[schema(example = "secret")]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/token", post(login_for_access_token))
        .route("/refresh_token", post(refresh_access_token))
}

/// Exchange email and password for an access token
#[utoipa::path(
    post,
    path = "/auth/token",
    tag = "Authentication",
    request_body(content = TokenRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Incorrect email or password"),
        (status = 422, description = "Malformed form body")
    )
)]
pub async fn login_for_access_token(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .services
        .auth()
        .login(form.username, form.password)
        .await?;

    Ok(Json(token))
}

/// Issue a fresh token for the authenticated user
#[utoipa::path(
    post,
    path = "/auth/refresh_token",
    tag = "Authentication",
    responses(
        (status = 200, description = "New token issued", body = TokenResponse),
        (status = 401, description = "Could not validate credentials")
    ),
    security(("bearer_auth" = []))
)]
pub async fn refresh_access_token(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<TokenResponse>> {
    let token = state.services.auth().refresh(&user)?;
    Ok(Json(token))
}
