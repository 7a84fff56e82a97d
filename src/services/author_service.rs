//! Author service - create, query, rename and delete authors.

use async_trait::async_trait;
use std::sync::Arc;

use super::uniqueness::UniquenessGuard;
use crate::config::{DETAIL_AUTHOR_NOT_FOUND, DETAIL_AUTHOR_NOT_FOUND_ON_WRITE, DETAIL_EMPTY_STRING};
use crate::domain::{Author, AuthorFilter};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;
use crate::utils::sanitize_non_empty;

#[async_trait]
pub trait AuthorService: Send + Sync {
    async fn create_author(&self, name: String) -> AppResult<Author>;

    async fn get_author(&self, id: i32) -> AppResult<Author>;

    /// `name` filters by substring after sanitization
    async fn list_authors(
        &self,
        name: Option<String>,
        page: PaginationParams,
    ) -> AppResult<Vec<Author>>;

    async fn patch_author(&self, id: i32, name: Option<String>) -> AppResult<Author>;

    /// Removes the author together with all of their books
    async fn delete_author(&self, id: i32) -> AppResult<()>;
}

pub struct AuthorManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AuthorManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn required_name(raw: Option<&str>) -> AppResult<String> {
    raw.and_then(sanitize_non_empty)
        .ok_or_else(|| AppError::validation(DETAIL_EMPTY_STRING))
}

#[async_trait]
impl<U: UnitOfWork> AuthorService for AuthorManager<U> {
    async fn create_author(&self, name: String) -> AppResult<Author> {
        let name = required_name(Some(&name))?;
        UniquenessGuard::new(self.uow.as_ref())
            .check_author(&name)
            .await?;

        let author = self.uow.authors().create(name).await?;
        tracing::info!(author_id = author.id, "author created");
        Ok(author)
    }

    async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.uow
            .authors()
            .find_by_id(id)
            .await?
            .ok_or_not_found(DETAIL_AUTHOR_NOT_FOUND)
    }

    async fn list_authors(
        &self,
        name: Option<String>,
        page: PaginationParams,
    ) -> AppResult<Vec<Author>> {
        let filter = AuthorFilter {
            name: name.as_deref().and_then(sanitize_non_empty),
        };
        self.uow.authors().list(filter, page).await
    }

    async fn patch_author(&self, id: i32, name: Option<String>) -> AppResult<Author> {
        let authors = self.uow.authors();
        authors
            .find_by_id(id)
            .await?
            .ok_or_not_found(DETAIL_AUTHOR_NOT_FOUND_ON_WRITE)?;

        let name = required_name(name.as_deref())?;
        UniquenessGuard::new(self.uow.as_ref())
            .check_author(&name)
            .await?;

        let author = authors.rename(id, name).await?;
        tracing::info!(author_id = author.id, "author renamed");
        Ok(author)
    }

    async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.uow.authors().delete(id).await?;
        tracing::info!(author_id = id, "author deleted");
        Ok(())
    }
}
