use std::sync::Arc;

use axum::{Router, middleware};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};

use crate::{
    config::{AppConfig, DatabaseConfig},
    db::connection,
    middleware::{catch_panic_layer, json_error_middleware},
    routes::router,
    state::AppState,
};

pub const IN_MEMORY_SQLITE_URL: &str = "sqlite::memory:";

/// Full router with the same layers the binary installs.
pub fn app_router(db: DatabaseConnection) -> Router {
    let state = AppState::new(AppConfig::default(), db);
    Router::new()
        .merge(router(Arc::clone(&state)))
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
}

/// Router over a mock connection with no queued results.
pub fn test_router() -> Router {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    app_router(db)
}

/// Fresh in-memory SQLite database with the schema synced from the entities.
pub async fn sqlite_db() -> DatabaseConnection {
    let cfg = DatabaseConfig {
        url: IN_MEMORY_SQLITE_URL.to_string(),
        ..DatabaseConfig::default()
    };
    connection::connect(&cfg)
        .await
        .expect("connect to in-memory sqlite")
}

pub async fn sqlite_router() -> Router {
    app_router(sqlite_db().await)
}
