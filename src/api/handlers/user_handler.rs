//! User handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{CurrentUser, ValidatedJson};
use crate::api::AppState;
use crate::domain::{UserList, UserResponse};
use crate::errors::AppResult;
use crate::services::UserPatch;
use crate::types::{MessageResponse, PaginationParams};

/// Full user payload, used for registration and PUT
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    /// Stored sanitized (lowercase, no punctuation)
    #[schema(example = "Test User")]
    pub username: String,
    #[validate(email(message = "value is not a valid email address"))]
    #[schema(example = "test@example.com")]
    pub email: String,
    #[schema(example = "secret")]
    pub password: String,
}

/// Partial user payload for PATCH
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserPatchRequest {
    pub username: Option<String>,
    #[validate(email(message = "value is not a valid email address"))]
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/:id",
            get(get_user)
                .put(replace_user)
                .patch(patch_user)
                .delete(delete_user),
        )
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Empty username"),
        (status = 409, description = "Username or email already exists"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .services
        .users()
        .create_user(payload.username, payload.email, payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// List users (100 per page unless `limit` is given)
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of users", body = UserList)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<UserList>> {
    let users = state.services.users().list_users(page.checked()?).await?;
    Ok(Json(UserList::from(users)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users().get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Replace the authenticated user's record
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Not enough permissions or empty username"),
        (status = 401, description = "Could not validate credentials"),
        (status = 409, description = "Username or email already exists")
    )
)]
pub async fn replace_user(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .services
        .users()
        .replace_user(
            &current_user,
            id,
            payload.username,
            payload.email,
            payload.password,
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Update some fields of the authenticated user's record
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UserPatchRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Not enough permissions or empty username"),
        (status = 401, description = "Could not validate credentials"),
        (status = 409, description = "Username or email already exists")
    )
)]
pub async fn patch_user(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UserPatchRequest>,
) -> AppResult<Json<UserResponse>> {
    let patch = UserPatch {
        username: payload.username,
        email: payload.email,
        password: payload.password,
    };
    let user = state
        .services
        .users()
        .patch_user(&current_user, id, patch)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Delete the authenticated user's account
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Not enough permissions"),
        (status = 401, description = "Could not validate credentials")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .users()
        .delete_user(&current_user, id)
        .await?;

    Ok(Json(MessageResponse::new("User deleted")))
}
