//! Load orchestrator - drives one complete load run
//!
//! A run has four phases:
//! 1. Reset the warehouse schema (fatal on failure)
//! 2. Load every table concurrently, each wrapped in retries
//! 3. Aggregate the per-table results into a [`LoadSummary`]
//! 4. Publish the outcome and, on full success, check row-count parity

use super::ddl;
use super::retry::{load_with_retry, RetryPolicy};
use super::table_loader::{DatabaseTableLoader, TableLoader};
use crate::adapters::database::{DatabaseClient, DatabaseClients};
use crate::config::LoadConfig;
use crate::core::events::EventPublisher;
use crate::core::verification::IntegrityChecker;
use crate::domain::{LoadResult, LoadSummary, LoaderError, Result, TableSpec};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Failure reason published when one or more tables failed
pub const COMPLETED_WITH_ERRORS: &str = "Marketing data load completed with errors";

/// Orchestrates schema reset, table loads, verification and events
pub struct LoadOrchestrator {
    destination: Arc<dyn DatabaseClient>,
    loader: Arc<dyn TableLoader>,
    checker: IntegrityChecker,
    publisher: Arc<dyn EventPublisher>,
    tables: Vec<TableSpec>,
    target_schema: String,
    max_parallel_tasks: usize,
    retry_policy: RetryPolicy,
}

impl LoadOrchestrator {
    /// Create a new orchestrator
    ///
    /// # Errors
    ///
    /// Returns a validation error if a configured table or schema name is
    /// not a valid identifier.
    pub fn new(
        config: &LoadConfig,
        clients: &DatabaseClients,
        publisher: Arc<dyn EventPublisher>,
    ) -> Result<Self> {
        let loader = DatabaseTableLoader::new(
            Arc::clone(&clients.source),
            Arc::clone(&clients.destination),
        );

        Ok(Self {
            destination: Arc::clone(&clients.destination),
            loader: Arc::new(loader),
            checker: IntegrityChecker::new(
                Arc::clone(&clients.source),
                Arc::clone(&clients.destination),
            ),
            publisher,
            tables: config.table_specs()?,
            target_schema: config.target_schema.clone(),
            max_parallel_tasks: config.max_parallel_tasks.max(1),
            retry_policy: RetryPolicy::from_config(config),
        })
    }

    /// Replace the table loader
    pub fn with_loader(mut self, loader: Arc<dyn TableLoader>) -> Self {
        self.loader = loader;
        self
    }

    /// Tables loaded by this orchestrator, in result order
    pub fn tables(&self) -> &[TableSpec] {
        &self.tables
    }

    /// Run one complete load
    ///
    /// Per-table failures are recorded in the returned summary. A failed
    /// schema reset aborts the run: a failure event is published and the
    /// error is returned.
    ///
    /// # Errors
    ///
    /// Returns a schema error if the warehouse schema cannot be reset.
    pub async fn load_all(&self) -> Result<LoadSummary> {
        tracing::info!(
            tables = self.tables.len(),
            max_parallel_tasks = self.max_parallel_tasks,
            retry_attempts = self.retry_policy.max_attempts(),
            "Starting marketing data load"
        );

        if let Err(e) = self.reset_schema().await {
            tracing::error!(error = %e, "Schema reset failed, aborting load");
            self.publisher
                .publish_failure(&format!("Marketing data load failed: {e}"), None)
                .await;
            return Err(e);
        }

        let results = self.load_tables().await;

        tracing::debug!("Aggregating load results");
        let summary = LoadSummary::from_results(results);

        if summary.has_failures() {
            tracing::debug!(
                failed_tables = summary.failed_tables,
                "Load finished with failures, publishing failure event"
            );
            self.publisher
                .publish_failure(COMPLETED_WITH_ERRORS, Some(&summary))
                .await;
            summary.log_summary();
            return Ok(summary);
        }

        self.publisher.publish_success(&summary).await;

        tracing::debug!("All tables loaded, verifying row counts");
        let checks = self.checker.verify_all(&self.tables).await;
        let summary = summary.with_integrity_checks(checks);
        summary.log_summary();

        Ok(summary)
    }

    /// Drop and recreate the target schema with one table per configured table
    async fn reset_schema(&self) -> Result<()> {
        tracing::debug!(schema = %self.target_schema, "Resetting warehouse schema");

        let statements = ddl::create_statements(&self.tables)?;
        self.destination
            .recreate_schema(&self.target_schema, &statements)
            .await
            .map_err(|e| match e {
                LoaderError::Schema(_) => e,
                other => LoaderError::Schema(other.to_string()),
            })
    }

    /// Load all tables, at most `max_parallel_tasks` at a time
    ///
    /// Every task is awaited; results come back in configured table order.
    async fn load_tables(&self) -> Vec<LoadResult> {
        tracing::debug!(tables = self.tables.len(), "Spawning table loads");

        let semaphore = Arc::new(Semaphore::new(self.max_parallel_tasks));
        let mut handles = Vec::with_capacity(self.tables.len());

        for table in &self.tables {
            let semaphore = Arc::clone(&semaphore);
            let loader = Arc::clone(&self.loader);
            let policy = self.retry_policy;
            let table = table.clone();

            handles.push(tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| LoaderError::Load(format!("Load scheduler closed: {e}")))?;
                Ok::<_, LoaderError>(load_with_retry(loader.as_ref(), &table, &policy).await)
            }));
        }

        let mut results = Vec::with_capacity(handles.len());
        for (table, handle) in self.tables.iter().zip(handles) {
            let result = match handle.await {
                Ok(Ok(result)) => result,
                Ok(Err(e)) => LoadResult::error(table.clone(), e.to_string(), Duration::ZERO),
                Err(e) => {
                    tracing::error!(table = %table, error = %e, "Table load task panicked");
                    LoadResult::error(
                        table.clone(),
                        format!("load task failed: {e}"),
                        Duration::ZERO,
                    )
                }
            };
            results.push(result);
        }

        results
    }
}
