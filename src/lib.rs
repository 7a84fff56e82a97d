//! Bookshelf - CRUD REST API for users, authors and books
//!
//! Free-text fields are sanitized before storage, and every write is
//! preceded by a uniqueness check that is backed by database constraints.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and value objects
//! - **services**: Use cases, including the uniqueness guard
//! - **infra**: Database, migrations, repositories, unit of work
//! - **api**: HTTP handlers, extractors, and routes
//! - **types**: Shared types (pagination, responses)
//! - **utils**: Text sanitization
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Author, Book, Password, User};
pub use errors::{AppError, AppResult};
pub use utils::sanitize;
