//! PostgreSQL adapter implementing database traits
//!
//! This module provides the implementation of the DatabaseClient and
//! EventStore traits for PostgreSQL.

use crate::adapters::database::traits::{DatabaseClient, EventStore};
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::core::load::ddl;
use crate::domain::{LoadEvent, LoaderError, Result, TableData};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// PostgreSQL implementation of database traits
///
/// This wraps the PostgreSQLClient and implements the DatabaseClient and
/// EventStore traits. Relation names passed in are validated identifiers.
pub struct PostgreSQLAdapter {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLAdapter {
    /// Create a new PostgreSQL adapter
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Create a new PostgreSQL adapter with an Arc-wrapped client
    pub fn new_with_arc(client: Arc<PostgreSQLClient>) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &Arc<PostgreSQLClient> {
        &self.client
    }
}

#[async_trait]
impl DatabaseClient for PostgreSQLAdapter {
    fn database_name(&self) -> &str {
        self.client.name()
    }

    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn fetch_all(&self, relation: &str) -> Result<TableData> {
        let query = format!("SELECT row_to_json(t) FROM {relation} t");
        let rows = self.client.query(&query, &[]).await?;

        let values = rows
            .iter()
            .map(|row| row.try_get::<_, Value>(0))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| LoaderError::Database(format!("Failed to decode row of {relation}: {e}")))?;

        Ok(TableData::from_values(values))
    }

    async fn count_rows(&self, relation: &str) -> Result<i64> {
        let query = format!("SELECT COUNT(*) FROM {relation}");
        let rows = self.client.query(&query, &[]).await?;

        let row = rows
            .first()
            .ok_or_else(|| LoaderError::Database(format!("COUNT(*) on {relation} returned no row")))?;

        row.try_get::<_, i64>(0)
            .map_err(|e| LoaderError::Database(format!("Failed to read row count of {relation}: {e}")))
    }

    async fn replace_rows(&self, relation: &str, data: &TableData) -> Result<u64> {
        let mut conn = self.client.get_connection().await?;
        let tx = conn.transaction().await.map_err(|e| {
            LoaderError::Database(format!("Failed to start transaction on {relation}: {e}"))
        })?;

        tx.batch_execute(&format!("TRUNCATE TABLE {relation}"))
            .await
            .map_err(|e| LoaderError::Database(format!("Failed to truncate {relation}: {e}")))?;

        let insert = insert_statement(relation, &data.columns());
        let rows = data.to_json_array();
        let inserted = tx
            .execute(insert.as_str(), &[&rows])
            .await
            .map_err(|e| LoaderError::Database(format!("Failed to insert into {relation}: {e}")))?;

        tx.commit().await.map_err(|e| {
            LoaderError::Database(format!("Failed to commit load of {relation}: {e}"))
        })?;

        Ok(inserted)
    }

    async fn recreate_schema(&self, schema: &str, statements: &[String]) -> Result<()> {
        let mut conn = self.client.get_connection().await?;
        let tx = conn
            .transaction()
            .await
            .map_err(|e| LoaderError::Schema(format!("Failed to start transaction: {e}")))?;

        tx.batch_execute(&format!(
            "DROP SCHEMA IF EXISTS {schema} CASCADE; CREATE SCHEMA {schema};"
        ))
        .await
        .map_err(|e| LoaderError::Schema(format!("Failed to recreate schema {schema}: {e}")))?;

        for statement in statements {
            tx.batch_execute(statement)
                .await
                .map_err(|e| LoaderError::Schema(format!("Failed to create table: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| LoaderError::Schema(format!("Failed to commit schema {schema}: {e}")))?;

        tracing::debug!(schema = %schema, tables = statements.len(), "Schema recreated");
        Ok(())
    }

    async fn close(&self) {
        self.client.close();
    }
}

#[async_trait]
impl EventStore for PostgreSQLAdapter {
    async fn ensure_event_log(&self, relation: &str) -> Result<()> {
        self.client
            .execute(&ddl::event_log_statement(relation), &[])
            .await
            .map_err(|e| LoaderError::Event(format!("Failed to create event log {relation}: {e}")))?;
        Ok(())
    }

    async fn append_event(&self, relation: &str, event: &LoadEvent) -> Result<()> {
        let event_data = event.to_json()?;
        let insert = format!(
            "INSERT INTO {relation} (event_type, status, timestamp, event_data) VALUES ($1, $2, $3, $4)"
        );

        self.client
            .execute(
                &insert,
                &[
                    &event.event_type.as_str(),
                    &event.status.as_str(),
                    &event.timestamp,
                    &event_data,
                ],
            )
            .await
            .map_err(|e| LoaderError::Event(format!("Failed to record event: {e}")))?;

        Ok(())
    }
}

/// Double-quoted SQL identifier
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Insert naming every source column, so a column missing from the
/// destination fails the statement instead of being dropped
fn insert_statement(relation: &str, columns: &[&str]) -> String {
    let columns = columns
        .iter()
        .map(|column| quote_identifier(column))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {relation} ({columns}) SELECT {columns} FROM json_populate_recordset(NULL::{relation}, $1::json)"
    )
}
