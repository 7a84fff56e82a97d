//! Author handlers. Reads are public, writes need a bearer token.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::{CurrentUser, ValidatedJson};
use crate::api::AppState;
use crate::domain::{AuthorList, AuthorResponse};
use crate::errors::AppResult;
use crate::types::{MessageResponse, PaginationParams};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AuthorRequest {
    #[schema(example = "George Orwell")]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AuthorPatchRequest {
    pub name: Option<String>,
}

/// Author list query
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AuthorListQuery {
    /// Substring of the author name
    pub name: Option<String>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

/// Create author routes
pub fn author_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_authors).post(create_author))
        .route(
            "/:id",
            get(get_author).patch(patch_author).delete(delete_author),
        )
}

#[utoipa::path(
    post,
    path = "/authors",
    tag = "Authors",
    security(("bearer_auth" = [])),
    request_body = AuthorRequest,
    responses(
        (status = 200, description = "Author created", body = AuthorResponse),
        (status = 400, description = "Empty name"),
        (status = 401, description = "Could not validate credentials"),
        (status = 409, description = "Author already exists")
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    _user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<AuthorRequest>,
) -> AppResult<Json<AuthorResponse>> {
    let author = state.services.authors().create_author(payload.name).await?;
    Ok(Json(AuthorResponse::from(author)))
}

#[utoipa::path(
    get,
    path = "/authors",
    tag = "Authors",
    params(AuthorListQuery),
    responses(
        (status = 200, description = "Matching authors", body = AuthorList)
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    Query(query): Query<AuthorListQuery>,
) -> AppResult<Json<AuthorList>> {
    let authors = state
        .services
        .authors()
        .list_authors(
            query.name,
            PaginationParams::new(query.offset, query.limit).checked()?,
        )
        .await?;

    Ok(Json(AuthorList::from(authors)))
}

#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "Authors",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author", body = AuthorResponse),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorResponse>> {
    let author = state.services.authors().get_author(id).await?;
    Ok(Json(AuthorResponse::from(author)))
}

#[utoipa::path(
    patch,
    path = "/authors/{id}",
    tag = "Authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    request_body = AuthorPatchRequest,
    responses(
        (status = 200, description = "Author renamed", body = AuthorResponse),
        (status = 400, description = "Empty name"),
        (status = 401, description = "Could not validate credentials"),
        (status = 404, description = "Author not found"),
        (status = 409, description = "Author already exists")
    )
)]
pub async fn patch_author(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<AuthorPatchRequest>,
) -> AppResult<Json<AuthorResponse>> {
    let author = state
        .services
        .authors()
        .patch_author(id, payload.name)
        .await?;

    Ok(Json(AuthorResponse::from(author)))
}

/// Delete an author and every book they wrote
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "Authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author deleted", body = MessageResponse),
        (status = 401, description = "Could not validate credentials"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.authors().delete_author(id).await?;
    Ok(Json(MessageResponse::new(
        "Author has been deleted successfully.",
    )))
}
