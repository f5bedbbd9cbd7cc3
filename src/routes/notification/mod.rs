mod handler;
mod model;

pub use handler::{
    create_notification, delete_notification, get_notification, list_community_notifications,
    list_notifications, update_notification,
};
