//! Row-count parity checks between source and destination
//!
//! Checks run after a fully successful load and are informational: a
//! mismatch never changes the status of a load that already completed.

use crate::adapters::database::DatabaseClient;
use crate::domain::{IntegrityCheck, TableSpec};
use std::sync::Arc;

/// Compares source and destination row counts
pub struct IntegrityChecker {
    source: Arc<dyn DatabaseClient>,
    destination: Arc<dyn DatabaseClient>,
}

impl IntegrityChecker {
    /// Create a new integrity checker
    pub fn new(source: Arc<dyn DatabaseClient>, destination: Arc<dyn DatabaseClient>) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Returns true iff both counts succeed and are equal
    ///
    /// A failing count query yields `false`; this never errors.
    pub async fn verify(&self, table: &TableSpec) -> bool {
        let source_relation = table.source_relation();
        let destination_relation = table.destination_relation();

        let (source_count, destination_count) = tokio::join!(
            self.source.count_rows(&source_relation),
            self.destination.count_rows(&destination_relation)
        );

        match (source_count, destination_count) {
            (Ok(source_count), Ok(destination_count)) => {
                let matches = source_count == destination_count;
                if matches {
                    tracing::debug!(table = %table, rows = source_count, "Integrity check passed");
                } else {
                    tracing::warn!(
                        table = %table,
                        source_count,
                        destination_count,
                        "Row count mismatch"
                    );
                }
                matches
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(table = %table, error = %e, "Integrity check failed");
                false
            }
        }
    }

    /// Checks every table, in the given order
    pub async fn verify_all(&self, tables: &[TableSpec]) -> Vec<IntegrityCheck> {
        tracing::info!(tables = tables.len(), "Running integrity checks");

        let mut checks = Vec::with_capacity(tables.len());
        for table in tables {
            let ok = self.verify(table).await;
            checks.push(IntegrityCheck::new(table, ok));
        }
        checks
    }
}
