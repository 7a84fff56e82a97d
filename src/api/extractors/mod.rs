//! Custom request extractors.

mod current_user;
mod validated;

pub use current_user::CurrentUser;
pub use validated::{ValidatedForm, ValidatedJson};
