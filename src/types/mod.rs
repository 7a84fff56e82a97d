//! Shared types for list and message responses.

mod pagination;
mod response;

pub use pagination::{PaginationParams, MAX_PAGE_VALUE};
pub use response::MessageResponse;
