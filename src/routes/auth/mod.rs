mod handler;
mod model;

pub use handler::{login, register};
pub use model::AuthResponse;

pub(crate) use handler::{hash, issue_token};
