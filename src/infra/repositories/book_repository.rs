//! Book repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::entities::book::{self, ActiveModel, Entity as BookEntity};
use crate::config::DETAIL_BOOK_NOT_FOUND_ON_WRITE;
use crate::domain::{Book, BookChanges, BookFilter, NewBook};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Book repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    /// The book with this (sanitized) title written by `author_id`, if any
    async fn find_by_title_and_author(&self, title: &str, author_id: i32)
        -> AppResult<Option<Book>>;

    /// List books ordered by id. `filter.title` must already be sanitized.
    async fn list(&self, filter: BookFilter, page: PaginationParams) -> AppResult<Vec<Book>>;

    async fn create(&self, book: NewBook) -> AppResult<Book>;

    async fn update(&self, id: i32, changes: BookChanges) -> AppResult<Book>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// SeaORM-backed book repository
pub struct BookStore {
    db: DatabaseConnection,
}

impl BookStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookRepository for BookStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let result = BookEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Book::from))
    }

    async fn find_by_title_and_author(
        &self,
        title: &str,
        author_id: i32,
    ) -> AppResult<Option<Book>> {
        let result = BookEntity::find()
            .filter(book::Column::Title.eq(title))
            .filter(book::Column::AuthorId.eq(author_id))
            .one(&self.db)
            .await?;

        Ok(result.map(Book::from))
    }

    async fn list(&self, filter: BookFilter, page: PaginationParams) -> AppResult<Vec<Book>> {
        let mut query = BookEntity::find();
        if let Some(title) = filter.title {
            query = query.filter(book::Column::Title.contains(title));
        }
        if let Some(year) = filter.year {
            query = query.filter(book::Column::Year.eq(year));
        }

        let models = query
            .order_by_asc(book::Column::Id)
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Book::from).collect())
    }

    async fn create(&self, new_book: NewBook) -> AppResult<Book> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            year: Set(new_book.year),
            title: Set(new_book.title),
            author_id: Set(new_book.author_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from_db)?;
        Ok(Book::from(model))
    }

    async fn update(&self, id: i32, changes: BookChanges) -> AppResult<Book> {
        let book = BookEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found(DETAIL_BOOK_NOT_FOUND_ON_WRITE)?;

        let mut active: ActiveModel = book.into();

        if let Some(year) = changes.year {
            active.year = Set(year);
        }
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(author_id) = changes.author_id {
            active.author_id = Set(author_id);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from_db)?;
        Ok(Book::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = BookEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(DETAIL_BOOK_NOT_FOUND_ON_WRITE));
        }

        Ok(())
    }
}
