use std::sync::Arc;

use inkpost_db::DynStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: both fields are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Persistence. `PgStore` in production.
    pub store: DynStore,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: DynStore, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
