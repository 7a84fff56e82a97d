//! Author repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::entities::author::{self, ActiveModel, Entity as AuthorEntity};
use crate::config::DETAIL_AUTHOR_NOT_FOUND_ON_WRITE;
use crate::domain::{Author, AuthorFilter};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Author repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Author>>;

    /// Exact match on the stored (sanitized) name
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Author>>;

    /// List authors ordered by id. `filter.name` must already be sanitized.
    async fn list(&self, filter: AuthorFilter, page: PaginationParams) -> AppResult<Vec<Author>>;

    async fn create(&self, name: String) -> AppResult<Author>;

    async fn rename(&self, id: i32, name: String) -> AppResult<Author>;

    /// Delete an author; its books go with it.
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// SeaORM-backed author repository
pub struct AuthorStore {
    db: DatabaseConnection,
}

impl AuthorStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthorRepository for AuthorStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Author>> {
        let result = AuthorEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Author::from))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Author>> {
        let result = AuthorEntity::find()
            .filter(author::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        Ok(result.map(Author::from))
    }

    async fn list(&self, filter: AuthorFilter, page: PaginationParams) -> AppResult<Vec<Author>> {
        let mut query = AuthorEntity::find();
        if let Some(name) = filter.name {
            query = query.filter(author::Column::Name.contains(name));
        }

        let models = query
            .order_by_asc(author::Column::Id)
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Author::from).collect())
    }

    async fn create(&self, name: String) -> AppResult<Author> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            name: Set(name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from_db)?;
        Ok(Author::from(model))
    }

    async fn rename(&self, id: i32, name: String) -> AppResult<Author> {
        let author = AuthorEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found(DETAIL_AUTHOR_NOT_FOUND_ON_WRITE)?;

        let mut active: ActiveModel = author.into();
        active.name = Set(name);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from_db)?;
        Ok(Author::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = AuthorEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(DETAIL_AUTHOR_NOT_FOUND_ON_WRITE));
        }

        Ok(())
    }
}
