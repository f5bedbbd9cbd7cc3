mod handler;
mod model;

pub use handler::{create_user, delete_user, get_user, update_user};
