//! Book service - books are unique per (author, title) and must reference
//! an existing author.

use async_trait::async_trait;
use std::sync::Arc;

use super::uniqueness::UniquenessGuard;
use crate::config::{
    DETAIL_BOOK_NOT_FOUND, DETAIL_BOOK_NOT_FOUND_ON_WRITE, DETAIL_EMPTY_FIELD, DETAIL_EMPTY_STRING,
};
use crate::domain::{Book, BookChanges, BookFilter, NewBook};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;
use crate::utils::{sanitize, sanitize_non_empty};

/// Fields supplied to a partial book update
#[derive(Debug, Clone, Default)]
pub struct BookPatch {
    pub year: Option<i32>,
    pub title: Option<String>,
    pub author_id: Option<i32>,
}

#[async_trait]
pub trait BookService: Send + Sync {
    async fn create_book(&self, year: i32, title: String, author_id: i32) -> AppResult<Book>;

    async fn get_book(&self, id: i32) -> AppResult<Book>;

    async fn list_books(
        &self,
        title: Option<String>,
        year: Option<i32>,
        page: PaginationParams,
    ) -> AppResult<Vec<Book>>;

    async fn patch_book(&self, id: i32, patch: BookPatch) -> AppResult<Book>;

    async fn delete_book(&self, id: i32) -> AppResult<()>;
}

pub struct BookManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> BookManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    fn guard(&self) -> UniquenessGuard<'_, U> {
        UniquenessGuard::new(self.uow.as_ref())
    }
}

#[async_trait]
impl<U: UnitOfWork> BookService for BookManager<U> {
    async fn create_book(&self, year: i32, title: String, author_id: i32) -> AppResult<Book> {
        let title = sanitize(&title);
        if title.is_empty() || year == 0 || author_id == 0 {
            return Err(AppError::validation(DETAIL_EMPTY_FIELD));
        }

        let guard = self.guard();
        guard.check_book(&title, author_id, None).await?;
        guard.ensure_author_exists(author_id).await?;

        let book = self
            .uow
            .books()
            .create(NewBook {
                year,
                title,
                author_id,
            })
            .await?;

        tracing::info!(book_id = book.id, author_id, "book created");
        Ok(book)
    }

    async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.uow
            .books()
            .find_by_id(id)
            .await?
            .ok_or_not_found(DETAIL_BOOK_NOT_FOUND)
    }

    async fn list_books(
        &self,
        title: Option<String>,
        year: Option<i32>,
        page: PaginationParams,
    ) -> AppResult<Vec<Book>> {
        let filter = BookFilter {
            title: title.as_deref().and_then(sanitize_non_empty),
            year,
        };
        self.uow.books().list(filter, page).await
    }

    async fn patch_book(&self, id: i32, patch: BookPatch) -> AppResult<Book> {
        let books = self.uow.books();
        let current = books
            .find_by_id(id)
            .await?
            .ok_or_not_found(DETAIL_BOOK_NOT_FOUND_ON_WRITE)?;

        let title = match patch.title.as_deref() {
            Some(raw) => Some(
                sanitize_non_empty(raw).ok_or_else(|| AppError::validation(DETAIL_EMPTY_STRING))?,
            ),
            None => None,
        };
        let changes = BookChanges {
            year: patch.year.filter(|year| *year != 0),
            title,
            author_id: patch.author_id,
        };

        if changes.title.is_some() || changes.author_id.is_some() {
            let guard = self.guard();
            let title = changes.title.as_deref().unwrap_or(&current.title);
            let author_id = changes.author_id.unwrap_or(current.author_id);
            guard.check_book(title, author_id, Some(id)).await?;

            if let Some(author_id) = changes.author_id {
                guard.ensure_author_exists(author_id).await?;
            }
        }

        if changes.is_empty() {
            return Ok(current);
        }

        let book = books.update(id, changes).await?;
        tracing::info!(book_id = book.id, "book patched");
        Ok(book)
    }

    async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.uow.books().delete(id).await?;
        tracing::info!(book_id = id, "book deleted");
        Ok(())
    }
}
