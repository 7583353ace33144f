use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the pool is internally reference-counted, the
/// config sits behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: fleetlog_db::DbPool,
    /// Server configuration (used by the auth extractor and middleware).
    pub config: Arc<ServerConfig>,
}
