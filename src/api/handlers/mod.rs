//! HTTP request handlers.

pub mod auth_handler;
pub mod author_handler;
pub mod book_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use author_handler::author_routes;
pub use book_handler::book_routes;
pub use user_handler::user_routes;
