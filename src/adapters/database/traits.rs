//! Database abstraction traits
//!
//! This module defines the traits that database adapters must implement
//! to take part in a load run. The same trait serves the olist source and the
//! dwh destination; each side only uses the operations it needs.

use crate::domain::{LoadEvent, Result, TableData};
use async_trait::async_trait;

/// Database client trait for copying relations
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Logical name of the database ("olist" or "dwh"), used in logs
    fn database_name(&self) -> &str;

    /// Test the database connection
    ///
    /// # Errors
    ///
    /// Returns an error if the connection test fails.
    async fn test_connection(&self) -> Result<()>;

    /// Read every row of a relation
    ///
    /// # Arguments
    ///
    /// * `relation` - Schema-qualified relation name, already validated
    ///
    /// # Errors
    ///
    /// Returns an error if the relation cannot be read.
    async fn fetch_all(&self, relation: &str) -> Result<TableData>;

    /// Count the rows of a relation
    ///
    /// # Errors
    ///
    /// Returns an error if the relation cannot be counted.
    async fn count_rows(&self, relation: &str) -> Result<i64>;

    /// Replace the contents of a relation with `data`
    ///
    /// Truncate and insert run in one transaction: either every row lands or
    /// the relation is left as it was.
    ///
    /// # Returns
    ///
    /// Returns the number of rows inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails; nothing is committed.
    async fn replace_rows(&self, relation: &str, data: &TableData) -> Result<u64>;

    /// Drop `schema` with everything in it, recreate it and run `statements`
    ///
    /// All steps run in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; nothing is committed.
    async fn recreate_schema(&self, schema: &str, statements: &[String]) -> Result<()>;

    /// Close the client's connection pool
    async fn close(&self);
}

/// Append-only storage for load events
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Create the event log relation if it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the relation cannot be created.
    async fn ensure_event_log(&self, relation: &str) -> Result<()>;

    /// Append one event to the event log relation
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    async fn append_event(&self, relation: &str, event: &LoadEvent) -> Result<()>;
}
