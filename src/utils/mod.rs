//! Utility functions and helpers.

pub mod sanitize;

pub use sanitize::{sanitize, sanitize_non_empty};
