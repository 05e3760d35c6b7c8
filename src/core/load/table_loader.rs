//! Single-table extract and load

use crate::adapters::database::DatabaseClient;
use crate::domain::{LoadResult, Result, TableSpec};
use crate::log_table_loaded;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Copies one table from the source to the destination
///
/// Implementations report load failures as an error [`LoadResult`]; an `Err`
/// is reserved for failures outside the load itself and is treated the same
/// way by the retry wrapper.
#[async_trait]
pub trait TableLoader: Send + Sync {
    async fn load(&self, table: &TableSpec) -> Result<LoadResult>;
}

/// Loader that reads the whole source relation and replaces the destination
/// relation in a single transaction
pub struct DatabaseTableLoader {
    source: Arc<dyn DatabaseClient>,
    destination: Arc<dyn DatabaseClient>,
}

impl DatabaseTableLoader {
    pub fn new(source: Arc<dyn DatabaseClient>, destination: Arc<dyn DatabaseClient>) -> Self {
        Self {
            source,
            destination,
        }
    }
}

#[async_trait]
impl TableLoader for DatabaseTableLoader {
    async fn load(&self, table: &TableSpec) -> Result<LoadResult> {
        let start = Instant::now();
        let source_relation = table.source_relation();

        tracing::debug!(
            table = %table,
            source = %source_relation,
            database = self.source.database_name(),
            "Fetching source rows"
        );

        let data = match self.source.fetch_all(&source_relation).await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(table = %table, error = %e, "Failed to fetch source rows");
                return Ok(LoadResult::error(
                    table.clone(),
                    e.to_string(),
                    start.elapsed(),
                ));
            }
        };

        if data.is_empty() {
            tracing::warn!(table = %table, source = %source_relation, "No data found in source table");
            return Ok(LoadResult::success(table.clone(), 0, Duration::ZERO));
        }

        let destination_relation = table.destination_relation();
        match self
            .destination
            .replace_rows(&destination_relation, &data)
            .await
        {
            Ok(inserted) => {
                let duration = start.elapsed();
                log_table_loaded!(table, inserted, duration);
                Ok(LoadResult::success(table.clone(), inserted, duration))
            }
            Err(e) => {
                tracing::warn!(
                    table = %table,
                    destination = %destination_relation,
                    error = %e,
                    "Failed to load table"
                );
                Ok(LoadResult::error(
                    table.clone(),
                    e.to_string(),
                    start.elapsed(),
                ))
            }
        }
    }
}
