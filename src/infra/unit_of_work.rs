//! Unit of Work pattern implementation.
//!
//! Centralizes access to all repositories so services depend on a single
//! handle. Every repository call commits on its own; the storage constraints
//! are what keep concurrent writers consistent.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    AuthorRepository, AuthorStore, BookRepository, BookStore, UserRepository, UserStore,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Unit of Work trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get author repository
    fn authors(&self) -> Arc<dyn AuthorRepository>;

    /// Get book repository
    fn books(&self) -> Arc<dyn BookRepository>;
}

/// Concrete implementation of UnitOfWork over a SeaORM connection
pub struct Persistence {
    user_repo: Arc<UserStore>,
    author_repo: Arc<AuthorStore>,
    book_repo: Arc<BookStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            author_repo: Arc::new(AuthorStore::new(db.clone())),
            book_repo: Arc::new(BookStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn authors(&self) -> Arc<dyn AuthorRepository> {
        self.author_repo.clone()
    }

    fn books(&self) -> Arc<dyn BookRepository> {
        self.book_repo.clone()
    }
}
