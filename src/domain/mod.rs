//! Domain layer - Core business entities and logic
//!
//! Entities and value objects independent of persistence and transport.

pub mod author;
pub mod book;
pub mod password;
pub mod user;

pub use author::{Author, AuthorFilter, AuthorList, AuthorResponse};
pub use book::{Book, BookChanges, BookFilter, BookList, BookResponse, NewBook};
pub use password::Password;
pub use user::{NewUser, User, UserChanges, UserList, UserResponse};
