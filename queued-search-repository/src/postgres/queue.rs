//! PostgreSQL-backed queue.
//!
//! Messages live in the `search_queue` table, one row per message, ordered by
//! their `BIGSERIAL` id. Several named queues can share the table.

use async_trait::async_trait;
use tracing::debug;

use crate::errors::QueueError;
use crate::interfaces::QueueTransport;

/// Durable FIFO queue stored in PostgreSQL.
pub struct PostgresQueue {
    /// PostgreSQL connection pool
    pool: sqlx::PgPool,
    name: String,
}

impl PostgresQueue {
    /// Creates a queue over an existing pool.
    ///
    /// # Arguments
    ///
    /// * `pool` - Connection pool to a database holding the `search_queue` table
    /// * `name` - Name of the queue within the table
    pub fn new(pool: sqlx::PgPool, name: impl Into<String>) -> Self {
        Self {
            pool,
            name: name.into(),
        }
    }
}

#[async_trait]
impl QueueTransport for PostgresQueue {
    fn name(&self) -> &str {
        &self.name
    }

    async fn write(&self, message: &str) -> Result<(), QueueError> {
        sqlx::query("INSERT INTO search_queue (queue_name, message) VALUES ($1, $2)")
            .bind(&self.name)
            .bind(message)
            .execute(&self.pool)
            .await?;

        debug!(queue = %self.name, message = %message, "Message written");
        Ok(())
    }

    async fn read(&self) -> Result<String, QueueError> {
        let message: Option<String> = sqlx::query_scalar(
            "DELETE FROM search_queue
             WHERE id = (
                 SELECT id FROM search_queue
                 WHERE queue_name = $1
                 ORDER BY id
                 LIMIT 1
                 FOR UPDATE SKIP LOCKED
             )
             RETURNING message",
        )
        .bind(&self.name)
        .fetch_optional(&self.pool)
        .await?;

        message.ok_or_else(|| QueueError::empty(&self.name))
    }

    async fn len(&self) -> Result<usize, QueueError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM search_queue WHERE queue_name = $1")
            .bind(&self.name)
            .fetch_one(&self.pool)
            .await?;

        usize::try_from(count)
            .map_err(|e| QueueError::storage(format!("Invalid queue length {}: {}", count, e)))
    }

    async fn delete_all(&self) -> Result<(), QueueError> {
        sqlx::query("DELETE FROM search_queue WHERE queue_name = $1")
            .bind(&self.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
