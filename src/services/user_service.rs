//! User service - Handles user-related business logic.
//!
//! Orchestrates sanitization, the uniqueness guard and persistence via the
//! Unit of Work. Only the owner of a record may modify or delete it.

use async_trait::async_trait;
use std::sync::Arc;

use super::uniqueness::UniquenessGuard;
use crate::config::{DEFAULT_USER_LIST_LIMIT, DETAIL_EMPTY_STRING, DETAIL_USER_NOT_FOUND};
use crate::domain::{NewUser, Password, User, UserChanges};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;
use crate::utils::sanitize_non_empty;

/// Fields supplied to a partial user update
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new account
    async fn create_user(&self, username: String, email: String, password: String)
        -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// List users; at most 100 unless a limit is given
    async fn list_users(&self, page: PaginationParams) -> AppResult<Vec<User>>;

    /// Replace every field of the acting user's record
    async fn replace_user(
        &self,
        acting: &User,
        id: i32,
        username: String,
        email: String,
        password: String,
    ) -> AppResult<User>;

    /// Update only the provided fields of the acting user's record
    async fn patch_user(&self, acting: &User, id: i32, patch: UserPatch) -> AppResult<User>;

    /// Delete the acting user's own account
    async fn delete_user(&self, acting: &User, id: i32) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    fn guard(&self) -> UniquenessGuard<'_, U> {
        UniquenessGuard::new(self.uow.as_ref())
    }
}

fn ensure_owner(acting: &User, id: i32) -> AppResult<()> {
    if acting.owns(id) {
        Ok(())
    } else {
        tracing::warn!(acting = acting.id, target = id, "user tried to modify another account");
        Err(AppError::PermissionDenied)
    }
}

fn required_username(raw: &str) -> AppResult<String> {
    sanitize_non_empty(raw).ok_or_else(|| AppError::validation(DETAIL_EMPTY_STRING))
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn create_user(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> AppResult<User> {
        let username = required_username(&username)?;
        self.guard().check_new_user(&username, &email).await?;

        let password_hash = Password::new(&password)?.into_string();
        let user = self
            .uow
            .users()
            .create(NewUser {
                username,
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, "user created");
        Ok(user)
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or_not_found(DETAIL_USER_NOT_FOUND)
    }

    async fn list_users(&self, page: PaginationParams) -> AppResult<Vec<User>> {
        self.uow
            .users()
            .list(page.with_default_limit(DEFAULT_USER_LIST_LIMIT))
            .await
    }

    async fn replace_user(
        &self,
        acting: &User,
        id: i32,
        username: String,
        email: String,
        password: String,
    ) -> AppResult<User> {
        ensure_owner(acting, id)?;

        let username = required_username(&username)?;
        self.guard().check_new_user(&username, &email).await?;

        let password_hash = Password::new(&password)?.into_string();
        let user = self
            .uow
            .users()
            .update(
                acting.id,
                UserChanges {
                    username: Some(username),
                    email: Some(email),
                    password_hash: Some(password_hash),
                },
            )
            .await?;

        tracing::info!(user_id = user.id, "user replaced");
        Ok(user)
    }

    async fn patch_user(&self, acting: &User, id: i32, patch: UserPatch) -> AppResult<User> {
        ensure_owner(acting, id)?;

        let username = match patch.username.as_deref() {
            Some(raw) => Some(required_username(raw)?),
            None => None,
        };
        let email = patch.email.filter(|email| !email.is_empty());

        self.guard()
            .check_user_fields(username.as_deref(), email.as_deref())
            .await?;

        // An empty password leaves the stored one untouched
        let password_hash = match patch.password.filter(|p| !p.is_empty()) {
            Some(password) => Some(Password::new(&password)?.into_string()),
            None => None,
        };

        let user = self
            .uow
            .users()
            .update(
                acting.id,
                UserChanges {
                    username,
                    email,
                    password_hash,
                },
            )
            .await?;

        tracing::info!(user_id = user.id, "user patched");
        Ok(user)
    }

    async fn delete_user(&self, acting: &User, id: i32) -> AppResult<()> {
        ensure_owner(acting, id)?;

        self.uow.users().delete(acting.id).await?;
        tracing::info!(user_id = acting.id, "user deleted");
        Ok(())
    }
}
