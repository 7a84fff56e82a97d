//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! Write paths translate constraint violations into `AppError::Conflict`.

mod author_repository;
mod book_repository;
pub(crate) mod entities;
mod user_repository;

pub use author_repository::{AuthorRepository, AuthorStore};
pub use book_repository::{BookRepository, BookStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use author_repository::MockAuthorRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use book_repository::MockBookRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
