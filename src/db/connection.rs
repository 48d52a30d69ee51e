use sea_orm::DatabaseConnection;
use tracing::info;

use super::providers::default_registry;
use crate::config::DatabaseConfig;

/// Connects through the provider matching the URL scheme and syncs the
/// `members`/`tasks` schema (tables, unique email, indexes) from the
/// entity definitions.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let provider = default_registry().provider_for_url(&cfg.url)?;
    info!(provider = provider.id().as_str(), "connecting to database");

    let db = provider.connect(cfg).await?;
    provider.post_connect(&db, cfg).await?;

    info!("syncing database schema from entities");
    db.get_schema_registry("task_board::db::entities::*")
        .sync(&db)
        .await?;
    Ok(db)
}
