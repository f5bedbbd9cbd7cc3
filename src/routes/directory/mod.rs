mod handler;
mod model;

pub use handler::{
    create_directory, delete_directory, get_directory, list_directories, update_directory,
};
