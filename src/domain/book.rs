//! Book domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Book domain entity. `(author_id, title)` is unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub year: i32,
    /// Sanitized
    pub title: String,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for inserting a book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub year: i32,
    pub title: String,
    pub author_id: i32,
}

/// Field changes to apply to a stored book
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookChanges {
    pub year: Option<i32>,
    pub title: Option<String>,
    pub author_id: Option<i32>,
}

impl BookChanges {
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.title.is_none() && self.author_id.is_none()
    }
}

/// Book list filter: substring on sanitized title, equality on year
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub title: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct BookResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1942)]
    pub year: i32,
    #[schema(example = "fundação")]
    pub title: String,
    #[schema(example = 1)]
    pub author_id: i32,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            year: book.year,
            title: book.title,
            author_id: book.author_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookList {
    pub books: Vec<BookResponse>,
}

impl From<Vec<Book>> for BookList {
    fn from(books: Vec<Book>) -> Self {
        Self {
            books: books.into_iter().map(BookResponse::from).collect(),
        }
    }
}
