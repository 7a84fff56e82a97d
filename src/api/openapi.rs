//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, author_handler, book_handler, user_handler};
use crate::api::routes;
use crate::domain::{AuthorList, AuthorResponse, BookList, BookResponse, UserList, UserResponse};
use crate::services::TokenResponse;
use crate::types::MessageResponse;

/// OpenAPI documentation for the Bookshelf API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "0.1.0",
        description = "Users, authors and books with bearer-token authentication",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        routes::root,
        // Authentication endpoints
        auth_handler::login_for_access_token,
        auth_handler::refresh_access_token,
        // User endpoints
        user_handler::create_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::replace_user,
        user_handler::patch_user,
        user_handler::delete_user,
        // Author endpoints
        author_handler::create_author,
        author_handler::list_authors,
        author_handler::get_author,
        author_handler::patch_author,
        author_handler::delete_author,
        // Book endpoints
        book_handler::create_book,
        book_handler::list_books,
        book_handler::get_book,
        book_handler::patch_book,
        book_handler::delete_book,
    ),
    components(
        schemas(
            MessageResponse,
            TokenResponse,
            UserResponse,
            UserList,
            AuthorResponse,
            AuthorList,
            BookResponse,
            BookList,
            auth_handler::TokenRequest,
            user_handler::UserRequest,
            user_handler::UserPatchRequest,
            author_handler::AuthorRequest,
            author_handler::AuthorPatchRequest,
            book_handler::BookRequest,
            book_handler::BookPatchRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service status"),
        (name = "Authentication", description = "Token issuance and refresh"),
        (name = "Users", description = "Account management"),
        (name = "Authors", description = "Author catalogue"),
        (name = "Books", description = "Book catalogue")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/token"))
                        .build(),
                ),
            );
        }
    }
}
