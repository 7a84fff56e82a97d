//! Author domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Author domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: i32,
    /// Sanitized, unique
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Author list filter; `name` is matched by substring after sanitization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorFilter {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct AuthorResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "george orwell")]
    pub name: String,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            name: author.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorList {
    pub authors: Vec<AuthorResponse>,
}

impl From<Vec<Author>> for AuthorList {
    fn from(authors: Vec<Author>) -> Self {
        Self {
            authors: authors.into_iter().map(AuthorResponse::from).collect(),
        }
    }
}
