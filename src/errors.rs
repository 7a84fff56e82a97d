//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

use crate::config::{
    DETAIL_AUTHOR_MISSING, DETAIL_BAD_CREDENTIALS, FK_BOOKS_AUTHOR, UQ_AUTHORS_NAME,
    UQ_BOOKS_AUTHOR_TITLE, UQ_USERS_EMAIL, UQ_USERS_USERNAME,
};

/// Which uniqueness invariant a write would break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    Username,
    Email,
    Author,
    Book,
}

impl ConflictKind {
    /// Client-facing detail for this conflict.
    pub fn detail(&self) -> &'static str {
        match self {
            ConflictKind::Username => "Username already exists",
            ConflictKind::Email => "Email already exists",
            ConflictKind::Author => "Author already exists",
            ConflictKind::Book => "Book from this author already exists",
        }
    }

    /// Map a database constraint/index name (or a driver message that
    /// embeds it) back to the conflict it guards.
    pub fn from_constraint(message: &str) -> Option<Self> {
        if message.contains(UQ_USERS_USERNAME) {
            Some(ConflictKind::Username)
        } else if message.contains(UQ_USERS_EMAIL) {
            Some(ConflictKind::Email)
        } else if message.contains(UQ_AUTHORS_NAME) {
            Some(ConflictKind::Author)
        } else if message.contains(UQ_BOOKS_AUTHOR_TITLE) {
            Some(ConflictKind::Book)
        } else {
            None
        }
    }
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.detail())
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Could not validate credentials")]
    Unauthorized,

    #[error("Incorrect email or password")]
    InvalidCredentials,

    /// Acting user is not the owner of the target record.
    #[error("Not enough permissions")]
    PermissionDenied,

    // Resource errors
    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(ConflictKind),

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unprocessable(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] DbErr),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    detail: String,
}

impl AppError {
    /// Get error code for logs
    fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::PermissionDenied => "PERMISSION_DENIED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Unprocessable(_) => "UNPROCESSABLE_ENTITY",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Jwt(_) => "AUTH_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials | AppError::Jwt(_) => {
                StatusCode::UNAUTHORIZED
            }
            // Kept at 400 for compatibility with existing clients
            AppError::PermissionDenied => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Jwt(e) => {
                tracing::debug!("JWT error: {:?}", e);
                DETAIL_BAD_CREDENTIALS.to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Translate a database error, turning constraint violations into the
    /// same vocabulary the uniqueness checks use.
    pub fn from_db(err: DbErr) -> Self {
        match err.sql_err().and_then(Self::from_sql_err) {
            Some(mapped) => mapped,
            None => AppError::Database(err),
        }
    }

    /// Map a classified constraint violation. `None` for constraints this
    /// application does not own.
    pub fn from_sql_err(err: SqlErr) -> Option<Self> {
        match err {
            SqlErr::UniqueConstraintViolation(message) => {
                ConflictKind::from_constraint(&message).map(AppError::Conflict)
            }
            SqlErr::ForeignKeyConstraintViolation(message)
                if message.contains(FK_BOOKS_AUTHOR) =>
            {
                Some(AppError::NotFound(DETAIL_AUTHOR_MISSING))
            }
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(code = self.code(), %status, "request failed");

        let challenge = matches!(self, AppError::Unauthorized | AppError::Jwt(_));
        let body = ErrorResponse {
            detail: self.user_message(),
        };

        let mut response = (status, Json(body)).into_response();
        if challenge {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, detail: &'static str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, detail: &'static str) -> AppResult<T> {
        self.ok_or(AppError::NotFound(detail))
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(kind: ConflictKind) -> Self {
        AppError::Conflict(kind)
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn unprocessable(msg: impl Into<String>) -> Self {
        AppError::Unprocessable(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DETAIL_EMPTY_STRING, DETAIL_USER_NOT_FOUND};

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::PermissionDenied.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::NotFound(DETAIL_USER_NOT_FOUND).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::conflict(ConflictKind::Email).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::validation(DETAIL_EMPTY_STRING).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::unprocessable("bad json").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_conflict_messages() {
        assert_eq!(
            AppError::conflict(ConflictKind::Username).to_string(),
            "Username already exists"
        );
        assert_eq!(
            AppError::conflict(ConflictKind::Book).to_string(),
            "Book from this author already exists"
        );
    }

    #[test]
    fn test_conflict_from_constraint_name() {
        let message = r#"duplicate key value violates unique constraint "uq_users_email""#;
        assert_eq!(ConflictKind::from_constraint(message), Some(ConflictKind::Email));
        assert_eq!(
            ConflictKind::from_constraint("uq_books_author_title"),
            Some(ConflictKind::Book)
        );
        assert_eq!(ConflictKind::from_constraint("pk_users"), None);
    }

    #[test]
    fn test_unique_violation_becomes_conflict() {
        let err = SqlErr::UniqueConstraintViolation(
            r#"duplicate key value violates unique constraint "uq_users_username""#.to_string(),
        );
        assert!(matches!(
            AppError::from_sql_err(err),
            Some(AppError::Conflict(ConflictKind::Username))
        ));

        let err = SqlErr::UniqueConstraintViolation(
            r#"duplicate key value violates unique constraint "uq_books_author_title""#.to_string(),
        );
        assert!(matches!(
            AppError::from_sql_err(err),
            Some(AppError::Conflict(ConflictKind::Book))
        ));
    }

    #[test]
    fn test_unknown_unique_violation_is_left_alone() {
        let err = SqlErr::UniqueConstraintViolation("users_pkey".to_string());
        assert!(AppError::from_sql_err(err).is_none());
    }

    #[test]
    fn test_author_fk_violation_becomes_not_found() {
        let err = SqlErr::ForeignKeyConstraintViolation(
            r#"insert or update on table "books" violates foreign key constraint "fk_books_author_id""#
                .to_string(),
        );
        let mapped = AppError::from_sql_err(err).unwrap();
        assert!(matches!(mapped, AppError::NotFound(DETAIL_AUTHOR_MISSING)));
        assert_eq!(mapped.status(), StatusCode::NOT_FOUND);

        let err = SqlErr::ForeignKeyConstraintViolation("fk_other".to_string());
        assert!(AppError::from_sql_err(err).is_none());
    }

    #[test]
    fn test_unrelated_db_error_is_not_a_conflict() {
        let err = AppError::from_db(DbErr::RecordNotFound("users".to_string()));
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_unauthorized_sets_challenge_header() {
        let response = AppError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers().get(WWW_AUTHENTICATE).unwrap(), "Bearer");
    }

    #[test]
    fn test_internal_message_hidden() {
        assert_eq!(
            AppError::internal("secret detail").user_message(),
            "An internal error occurred"
        );
    }
}
