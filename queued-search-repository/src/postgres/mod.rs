//! PostgreSQL implementations of the queue transport and the entity store.

mod entity_store;
mod queue;

pub use entity_store::{PostgresEntityStore, TableConfig};
pub use queue::PostgresQueue;

/// Apply the repository's migrations (the `search_queue` table).
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
