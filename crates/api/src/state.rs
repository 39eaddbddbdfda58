use std::sync::Arc;

use crate::auth::tokens::TokenKeys;
use crate::config::ServerConfig;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: taxi_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub tokens: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(pool: taxi_db::DbPool, config: ServerConfig) -> Self {
        let tokens = TokenKeys::new(&config.auth);
        Self {
            pool,
            config: Arc::new(config),
            tokens: Arc::new(tokens),
        }
    }
}
