mod handler;
mod model;
mod upload;

pub use handler::{delete_card, get_card, list_cards, update_card};
pub use upload::create_card;
