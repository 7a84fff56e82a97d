//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, and reach storage only through `UnitOfWork`.

mod auth_service;
mod author_service;
mod book_service;
pub mod container;
mod uniqueness;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use author_service::{AuthorManager, AuthorService};
pub use book_service::{BookManager, BookPatch, BookService};
pub use uniqueness::UniquenessGuard;
pub use user_service::{UserManager, UserPatch, UserService};
