mod handler;
mod model;

pub use handler::{
    create_community, delete_community, get_community, list_communities, list_community_cards,
    update_community,
};
