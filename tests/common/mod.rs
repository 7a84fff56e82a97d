//! Shared fixtures for integration tests: an in-memory unit of work that
//! enforces the same uniqueness and cascade rules as the database schema.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use bookshelf::config::{
    Config, DETAIL_AUTHOR_MISSING, DETAIL_AUTHOR_NOT_FOUND_ON_WRITE,
    DETAIL_BOOK_NOT_FOUND_ON_WRITE, DETAIL_USER_NOT_FOUND,
};
use bookshelf::domain::{
    Author, AuthorFilter, Book, BookChanges, BookFilter, NewBook, NewUser, User, UserChanges,
};
use bookshelf::errors::{AppError, AppResult, ConflictKind};
use bookshelf::infra::{AuthorRepository, BookRepository, UnitOfWork, UserRepository};
use bookshelf::types::PaginationParams;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    authors: Vec<Author>,
    books: Vec<Book>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory storage shared by the three fake repositories.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn book_count(&self) -> usize {
        self.tables.lock().unwrap().books.len()
    }

    /// Insert a user directly, bypassing the services.
    pub fn seed_user(&self, username: &str, email: &str, password_hash: &str) -> User {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        let user = User {
            id: tables.next_id(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        user
    }

    pub fn seed_author(&self, name: &str) -> Author {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        let author = Author {
            id: tables.next_id(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.authors.push(author.clone());
        author
    }

    pub fn seed_book(&self, year: i32, title: &str, author_id: i32) -> Book {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        let book = Book {
            id: tables.next_id(),
            year,
            title: title.to_string(),
            author_id,
            created_at: now,
            updated_at: now,
        };
        tables.books.push(book.clone());
        book
    }
}

fn page<T>(items: Vec<T>, page: PaginationParams) -> Vec<T> {
    let offset = usize::try_from(page.offset.unwrap_or(0)).unwrap_or(usize::MAX);
    let skipped = items.into_iter().skip(offset);
    match page.limit {
        Some(limit) => skipped
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect(),
        None => skipped.collect(),
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn list(&self, params: PaginationParams) -> AppResult<Vec<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(page(tables.users.clone(), params))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        {
            let tables = self.tables.lock().unwrap();
            if tables.users.iter().any(|u| u.username == new_user.username) {
                return Err(AppError::conflict(ConflictKind::Username));
            }
            if tables.users.iter().any(|u| u.email == new_user.email) {
                return Err(AppError::conflict(ConflictKind::Email));
            }
        }
        Ok(self.seed_user(&new_user.username, &new_user.email, &new_user.password_hash))
    }

    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<User> {
        let mut tables = self.tables.lock().unwrap();
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound(DETAIL_USER_NOT_FOUND))?;

        if let Some(username) = changes.username {
            user.username = username;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Err(AppError::NotFound(DETAIL_USER_NOT_FOUND));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthorRepository for MemoryStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Author>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.authors.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Author>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.authors.iter().find(|a| a.name == name).cloned())
    }

    async fn list(&self, filter: AuthorFilter, params: PaginationParams) -> AppResult<Vec<Author>> {
        let tables = self.tables.lock().unwrap();
        let matching = tables
            .authors
            .iter()
            .filter(|a| filter.name.as_deref().map_or(true, |n| a.name.contains(n)))
            .cloned()
            .collect();
        Ok(page(matching, params))
    }

    async fn create(&self, name: String) -> AppResult<Author> {
        if self.tables.lock().unwrap().authors.iter().any(|a| a.name == name) {
            return Err(AppError::conflict(ConflictKind::Author));
        }
        Ok(self.seed_author(&name))
    }

    async fn rename(&self, id: i32, name: String) -> AppResult<Author> {
        let mut tables = self.tables.lock().unwrap();
        let author = tables
            .authors
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(AppError::NotFound(DETAIL_AUTHOR_NOT_FOUND_ON_WRITE))?;
        author.name = name;
        author.updated_at = Utc::now();
        Ok(author.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.authors.len();
        tables.authors.retain(|a| a.id != id);
        if tables.authors.len() == before {
            return Err(AppError::NotFound(DETAIL_AUTHOR_NOT_FOUND_ON_WRITE));
        }
        // ON DELETE CASCADE
        tables.books.retain(|b| b.author_id != id);
        Ok(())
    }
}

#[async_trait]
impl BookRepository for MemoryStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.books.iter().find(|b| b.id == id).cloned())
    }

    async fn find_by_title_and_author(
        &self,
        title: &str,
        author_id: i32,
    ) -> AppResult<Option<Book>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .books
            .iter()
            .find(|b| b.title == title && b.author_id == author_id)
            .cloned())
    }

    async fn list(&self, filter: BookFilter, params: PaginationParams) -> AppResult<Vec<Book>> {
        let tables = self.tables.lock().unwrap();
        let matching = tables
            .books
            .iter()
            .filter(|b| filter.title.as_deref().map_or(true, |t| b.title.contains(t)))
            .filter(|b| filter.year.map_or(true, |y| b.year == y))
            .cloned()
            .collect();
        Ok(page(matching, params))
    }

    async fn create(&self, new_book: NewBook) -> AppResult<Book> {
        {
            let tables = self.tables.lock().unwrap();
            if !tables.authors.iter().any(|a| a.id == new_book.author_id) {
                return Err(AppError::NotFound(DETAIL_AUTHOR_MISSING));
            }
            if tables
                .books
                .iter()
                .any(|b| b.title == new_book.title && b.author_id == new_book.author_id)
            {
                return Err(AppError::conflict(ConflictKind::Book));
            }
        }
        Ok(self.seed_book(new_book.year, &new_book.title, new_book.author_id))
    }

    async fn update(&self, id: i32, changes: BookChanges) -> AppResult<Book> {
        let mut tables = self.tables.lock().unwrap();
        let book = tables
            .books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(AppError::NotFound(DETAIL_BOOK_NOT_FOUND_ON_WRITE))?;

        if let Some(year) = changes.year {
            book.year = year;
        }
        if let Some(title) = changes.title {
            book.title = title;
        }
        if let Some(author_id) = changes.author_id {
            book.author_id = author_id;
        }
        book.updated_at = Utc::now();
        Ok(book.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.books.len();
        tables.books.retain(|b| b.id != id);
        if tables.books.len() == before {
            return Err(AppError::NotFound(DETAIL_BOOK_NOT_FOUND_ON_WRITE));
        }
        Ok(())
    }
}

/// Unit of work handing out the in-memory repositories.
#[derive(Clone, Default)]
pub struct MemoryUnitOfWork {
    pub store: MemoryStore,
}

impl MemoryUnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UnitOfWork for MemoryUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(self.store.clone())
    }

    fn authors(&self) -> Arc<dyn AuthorRepository> {
        Arc::new(self.store.clone())
    }

    fn books(&self) -> Arc<dyn BookRepository> {
        Arc::new(self.store.clone())
    }
}

pub fn test_config() -> Config {
    Config::new(
        "postgres://localhost/bookshelf_test".to_string(),
        "integration-test-secret-at-least-32-chars".to_string(),
        30,
        "127.0.0.1".to_string(),
        8000,
    )
    .expect("valid test config")
}
