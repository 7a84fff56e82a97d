//! Service Container - Centralized service access.
//!
//! Depends on service traits, not implementations, so handlers can be
//! driven by any storage behind a `UnitOfWork`.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, AuthorManager, AuthorService, BookManager, BookService,
    UserManager, UserService,
};
use crate::config::Config;
use crate::infra::{Persistence, UnitOfWork};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get author service
    fn authors(&self) -> Arc<dyn AuthorService>;

    /// Get book service
    fn books(&self) -> Arc<dyn BookService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    author_service: Arc<dyn AuthorService>,
    book_service: Arc<dyn BookService>,
}

impl Services {
    /// Wire every service to the same unit of work
    pub fn from_unit_of_work<U: UnitOfWork + 'static>(uow: Arc<U>, config: Config) -> Self {
        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            author_service: Arc::new(AuthorManager::new(uow.clone())),
            book_service: Arc::new(BookManager::new(uow)),
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        Self::from_unit_of_work(Arc::new(Persistence::new(db)), config)
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn authors(&self) -> Arc<dyn AuthorService> {
        self.author_service.clone()
    }

    fn books(&self) -> Arc<dyn BookService> {
        self.book_service.clone()
    }
}
