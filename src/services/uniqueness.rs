//! Uniqueness guard - conflict checks that run before every write.
//!
//! All inputs are expected to be sanitized already. The guard is advisory:
//! a concurrent writer can still slip between check and insert, in which
//! case the storage constraint fires and the repository reports the same
//! `ConflictKind`.

use crate::config::DETAIL_AUTHOR_MISSING;
use crate::errors::{AppError, AppResult, ConflictKind};
use crate::infra::UnitOfWork;

/// Conflict checks over the repositories of a unit of work.
pub struct UniquenessGuard<'a, U: UnitOfWork + ?Sized> {
    uow: &'a U,
}

impl<'a, U: UnitOfWork + ?Sized> UniquenessGuard<'a, U> {
    pub fn new(uow: &'a U) -> Self {
        Self { uow }
    }

    /// Create or full update: both fields are checked, username first.
    pub async fn check_new_user(&self, username: &str, email: &str) -> AppResult<()> {
        self.check_user_fields(Some(username), Some(email)).await
    }

    /// Partial update: only the provided fields are checked.
    ///
    /// The acting user's own record counts, so resubmitting your current
    /// username is a conflict.
    pub async fn check_user_fields(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> AppResult<()> {
        let users = self.uow.users();

        if let Some(username) = username {
            if users.find_by_username(username).await?.is_some() {
                return Err(conflict(ConflictKind::Username));
            }
        }
        if let Some(email) = email {
            if users.find_by_email(email).await?.is_some() {
                return Err(conflict(ConflictKind::Email));
            }
        }
        Ok(())
    }

    /// Any author with this name is a conflict, including the one being renamed.
    pub async fn check_author(&self, name: &str) -> AppResult<()> {
        match self.uow.authors().find_by_name(name).await? {
            Some(_) => Err(conflict(ConflictKind::Author)),
            None => Ok(()),
        }
    }

    /// Conflict when another book by `author_id` already has `title`.
    /// `exclude_id` is the book being modified, if any.
    pub async fn check_book(
        &self,
        title: &str,
        author_id: i32,
        exclude_id: Option<i32>,
    ) -> AppResult<()> {
        let existing = self
            .uow
            .books()
            .find_by_title_and_author(title, author_id)
            .await?;

        match existing {
            Some(book) if Some(book.id) != exclude_id => Err(conflict(ConflictKind::Book)),
            _ => Ok(()),
        }
    }

    /// Books may only reference authors that exist.
    pub async fn ensure_author_exists(&self, author_id: i32) -> AppResult<()> {
        match self.uow.authors().find_by_id(author_id).await? {
            Some(_) => Ok(()),
            None => {
                tracing::warn!(author_id, "book references a missing author");
                Err(AppError::NotFound(DETAIL_AUTHOR_MISSING))
            }
        }
    }
}

fn conflict(kind: ConflictKind) -> AppError {
    tracing::warn!(conflict = %kind, "uniqueness check failed");
    AppError::conflict(kind)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::domain::{Author, Book, User};
    use crate::infra::{
        AuthorRepository, BookRepository, MockAuthorRepository, MockBookRepository,
        MockUnitOfWork, MockUserRepository, UserRepository,
    };

    fn user(id: i32, username: &str, email: &str) -> User {
        User {
            id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn author(id: i32, name: &str) -> Author {
        Author {
            id,
            name: name.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn book(id: i32, title: &str, author_id: i32) -> Book {
        Book {
            id,
            year: 1942,
            title: title.to_string(),
            author_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn uow_with_users(users: MockUserRepository) -> MockUnitOfWork {
        let users: Arc<dyn UserRepository> = Arc::new(users);
        let mut uow = MockUnitOfWork::new();
        uow.expect_users().returning(move || users.clone());
        uow
    }

    #[tokio::test]
    async fn test_username_checked_before_email() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(|_| Ok(Some(user(1, "test", "a@example.com"))));
        users.expect_find_by_email().never();

        let uow = uow_with_users(users);
        let err = UniquenessGuard::new(&uow)
            .check_new_user("test", "a@example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(ConflictKind::Username)));
    }

    #[tokio::test]
    async fn test_email_conflict() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));
        users
            .expect_find_by_email()
            .withf(|email| email == "taken@example.com")
            .returning(|_| Ok(Some(user(2, "other", "taken@example.com"))));

        let uow = uow_with_users(users);
        let err = UniquenessGuard::new(&uow)
            .check_new_user("fresh", "taken@example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(ConflictKind::Email)));
    }

    #[tokio::test]
    async fn test_patch_only_checks_present_fields() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().never();
        users.expect_find_by_email().times(1).returning(|_| Ok(None));

        let uow = uow_with_users(users);
        let result = UniquenessGuard::new(&uow)
            .check_user_fields(None, Some("new@example.com"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_author_conflict_includes_self() {
        let mut authors = MockAuthorRepository::new();
        authors
            .expect_find_by_name()
            .returning(|name| Ok(Some(author(1, name))));
        let authors: Arc<dyn AuthorRepository> = Arc::new(authors);

        let mut uow = MockUnitOfWork::new();
        uow.expect_authors().returning(move || authors.clone());

        let err = UniquenessGuard::new(&uow)
            .check_author("george orwell")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(ConflictKind::Author)));
    }

    #[tokio::test]
    async fn test_book_conflict_excludes_book_being_patched() {
        let mut books = MockBookRepository::new();
        books
            .expect_find_by_title_and_author()
            .returning(|title, author_id| Ok(Some(book(7, title, author_id))));
        let books: Arc<dyn BookRepository> = Arc::new(books);

        let mut uow = MockUnitOfWork::new();
        uow.expect_books().returning(move || books.clone());
        let guard = UniquenessGuard::new(&uow);

        assert!(guard.check_book("fundação", 1, Some(7)).await.is_ok());
        let err = guard.check_book("fundação", 1, Some(8)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ConflictKind::Book)));
        let err = guard.check_book("fundação", 1, None).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ConflictKind::Book)));
    }

    #[tokio::test]
    async fn test_missing_author() {
        let mut authors = MockAuthorRepository::new();
        authors.expect_find_by_id().returning(|_| Ok(None));
        let authors: Arc<dyn AuthorRepository> = Arc::new(authors);

        let mut uow = MockUnitOfWork::new();
        uow.expect_authors().returning(move || authors.clone());

        let err = UniquenessGuard::new(&uow)
            .ensure_author_exists(42)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Author does not exist in the database");
    }
}
