use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub http_client: reqwest::Client,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, http_client: reqwest::Client, config: Config) -> Self {
        Self {
            db,
            http_client,
            config: Arc::new(config),
        }
    }
}
