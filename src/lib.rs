use std::sync::Arc;

use config::Config;
use database::Store;
use storage::PhotoStorage;

pub mod config;
pub mod database;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod response;
pub mod router;
pub mod routes;
pub mod storage;
pub mod utils;
pub mod validation;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Config,
    pub storage: PhotoStorage,
}
