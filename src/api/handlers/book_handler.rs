//! Book handlers. Reads are public, writes need a bearer token.

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
use crate::domain::{BookList, BookResponse};
use crate::errors::AppResult;
use crate::services::BookPatch;
use crate::types::{MessageResponse, PaginationParams};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookRequest {
    #[schema(example = 1942)]
    pub year: i32,
    #[schema(example = "Fundação")]
    pub title: String,
    #[schema(example = 1)]
    pub author_id: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookPatchRequest {
    pub year: Option<i32>,
    pub title: Option<String>,
    pub author_id: Option<i32>,
}

/// Book list query
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookListQuery {
    /// Substring of the title
    pub title: Option<String>,
    /// Exact publication year
    pub year: Option<i32>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

/// Create book routes
pub fn book_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/:id", get(get_book).patch(patch_book).delete(delete_book))
}

#[utoipa::path(
    post,
    path = "/books",
    tag = "Books",
    security(("bearer_auth" = [])),
    request_body = BookRequest,
    responses(
        (status = 200, description = "Book created", body = BookResponse),
        (status = 400, description = "Empty field"),
        (status = 401, description = "Could not validate credentials"),
        (status = 404, description = "Author does not exist in the database"),
        (status = 409, description = "Book from this author already exists")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    _user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<BookRequest>,
) -> AppResult<Json<BookResponse>> {
    let book = state
        .services
        .books()
        .create_book(payload.year, payload.title, payload.author_id)
        .await?;

    Ok(Json(BookResponse::from(book)))
}

#[utoipa::path(
    get,
    path = "/books",
    tag = "Books",
    params(BookListQuery),
    responses(
        (status = 200, description = "Matching books", body = BookList)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookListQuery>,
) -> AppResult<Json<BookList>> {
    let books = state
        .services
        .books()
        .list_books(
            query.title,
            query.year,
            PaginationParams::new(query.offset, query.limit).checked()?,
        )
        .await?;

    Ok(Json(BookList::from(books)))
}

#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "Books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book", body = BookResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.books().get_book(id).await?;
    Ok(Json(BookResponse::from(book)))
}

#[utoipa::path(
    patch,
    path = "/books/{id}",
    tag = "Books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = BookPatchRequest,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Empty title"),
        (status = 401, description = "Could not validate credentials"),
        (status = 404, description = "Book or author not found"),
        (status = 409, description = "Book from this author already exists")
    )
)]
pub async fn patch_book(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<BookPatchRequest>,
) -> AppResult<Json<BookResponse>> {
    let patch = BookPatch {
        year: payload.year,
        title: payload.title,
        author_id: payload.author_id,
    };
    let book = state.services.books().patch_book(id, patch).await?;

    Ok(Json(BookResponse::from(book)))
}

#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "Books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 401, description = "Could not validate credentials"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books().delete_book(id).await?;
    Ok(Json(MessageResponse::new("Book has been deleted successfully.")))
}
