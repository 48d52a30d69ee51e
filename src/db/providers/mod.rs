mod postgres;
mod registry;
mod sqlite;

use std::sync::Arc;

pub use registry::{DbProvider, DbProviderId, DbProviders};

use self::{postgres::PostgresDbProvider, sqlite::SqliteDbProvider};

pub fn default_registry() -> DbProviders {
    let providers: Vec<Arc<dyn DbProvider>> =
        vec![Arc::new(PostgresDbProvider), Arc::new(SqliteDbProvider)];
    DbProviders::new(providers)
}
