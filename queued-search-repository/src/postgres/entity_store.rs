//! PostgreSQL-backed entity store.
//!
//! Each row of the configured table is one entity; the row, converted with
//! `row_to_json`, is the document handed to the index backend.

use async_trait::async_trait;
use queued_search_shared::{EntityIdentifier, EntityInstance};

use crate::errors::LookupError;
use crate::interfaces::EntityStore;
use crate::utils::quote_sql_identifier;

/// Default primary key column.
pub const DEFAULT_PRIMARY_KEY_COLUMN: &str = "id";

/// Where the rows of an entity type live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Table name, optionally schema-qualified.
    pub table: String,
    /// Primary key column.
    pub primary_key_column: String,
}

impl TableConfig {
    /// Create a table configuration with the default `id` primary key column.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            primary_key_column: DEFAULT_PRIMARY_KEY_COLUMN.to_string(),
        }
    }

    /// Use a different primary key column.
    pub fn with_primary_key_column(mut self, column: impl Into<String>) -> Self {
        self.primary_key_column = column.into();
        self
    }
}

/// Entity store reading rows from a PostgreSQL table.
pub struct PostgresEntityStore {
    pool: sqlx::PgPool,
    entity_type: String,
    select_sql: String,
}

impl PostgresEntityStore {
    /// Creates an entity store for one entity type.
    ///
    /// # Returns
    ///
    /// * `Ok(PostgresEntityStore)` - Ready-to-use store
    /// * `Err(LookupError)` - If the table or column name is not a plain SQL identifier
    pub fn new(
        pool: sqlx::PgPool,
        entity_type: impl Into<String>,
        table: &TableConfig,
    ) -> Result<Self, LookupError> {
        let select_sql = Self::select_sql(table)?;
        Ok(Self {
            pool,
            entity_type: entity_type.into(),
            select_sql,
        })
    }

    /// Build the lookup query. Two rows are fetched so ambiguity can be detected.
    fn select_sql(table: &TableConfig) -> Result<String, LookupError> {
        let table_name = quote_sql_identifier(&table.table)?;
        let column = quote_sql_identifier(&table.primary_key_column)?;
        Ok(format!(
            "SELECT row_to_json(t)::text FROM {} t WHERE t.{}::text = $1 LIMIT 2",
            table_name, column
        ))
    }
}

#[async_trait]
impl EntityStore for PostgresEntityStore {
    async fn get(&self, primary_key: &str) -> Result<EntityInstance, LookupError> {
        let rows: Vec<String> = sqlx::query_scalar(&self.select_sql)
            .bind(primary_key)
            .fetch_all(&self.pool)
            .await?;

        match rows.as_slice() {
            [] => Err(LookupError::not_found(&self.entity_type, primary_key)),
            [row] => {
                let document = serde_json::from_str(row).map_err(|e| {
                    LookupError::store(format!("Invalid row for '{}': {}", primary_key, e))
                })?;
                let identifier = EntityIdentifier::new(&self.entity_type, primary_key);
                Ok(EntityInstance::new(
                    identifier.to_string(),
                    primary_key,
                    document,
                ))
            }
            _ => Err(LookupError::ambiguous(&self.entity_type, primary_key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_sql_default_column() {
        let sql = PostgresEntityStore::select_sql(&TableConfig::new("notes")).unwrap();
        assert_eq!(
            sql,
            "SELECT row_to_json(t)::text FROM \"notes\" t WHERE t.\"id\"::text = $1 LIMIT 2"
        );
    }

    #[test]
    fn test_select_sql_custom_column() {
        let table = TableConfig::new("blog.posts").with_primary_key_column("post_id");
        let sql = PostgresEntityStore::select_sql(&table).unwrap();
        assert!(sql.contains("FROM \"blog\".\"posts\" t"));
        assert!(sql.contains("t.\"post_id\"::text = $1"));
    }

    #[test]
    fn test_select_sql_rejects_injection() {
        let table = TableConfig::new("notes; DROP TABLE notes");
        assert!(matches!(
            PostgresEntityStore::select_sql(&table),
            Err(LookupError::StoreError(_))
        ));
    }
}
