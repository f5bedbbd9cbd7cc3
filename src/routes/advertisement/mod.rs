mod handler;
mod model;

pub use handler::{create_advertisement, delete_advertisement, get_advertisement, list_advertisements, update_advertisement};
