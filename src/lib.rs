pub mod config;
pub mod db;
pub mod dtos;
pub mod error;
pub mod handler;
pub mod models;
pub mod routes;
pub mod utils;

use std::sync::Arc;

use config::Config;
use db::Storage;

#[derive(Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<dyn Storage>,
}
