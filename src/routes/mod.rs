pub mod advertisement;
pub mod auth;
pub mod card;
pub mod community;
pub mod directory;
pub mod notification;
pub mod user;
