//! Database client factory
//!
//! This module builds the source and destination clients from configuration.

use crate::adapters::database::traits::{DatabaseClient, EventStore};
use crate::adapters::postgresql::adapter::PostgreSQLAdapter;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::config::schema::LoaderConfig;
use crate::domain::Result;
use std::sync::Arc;

/// The database handles used by one loader instance
#[derive(Clone)]
pub struct DatabaseClients {
    /// Source database (olist)
    pub source: Arc<dyn DatabaseClient>,

    /// Destination warehouse (dwh)
    pub destination: Arc<dyn DatabaseClient>,

    /// Event log, backed by the destination pool
    pub event_store: Arc<dyn EventStore>,
}

/// Create the source and destination clients
///
/// The destination client doubles as the event store so both share one
/// connection pool.
///
/// # Errors
///
/// Returns an error if either pool cannot be created
pub async fn create_database_clients(config: &LoaderConfig) -> Result<DatabaseClients> {
    tracing::info!("Creating olist PostgreSQL client");
    let olist = PostgreSQLClient::new("olist", config.olist.clone()).await?;
    let source = Arc::new(PostgreSQLAdapter::new(olist));

    tracing::info!("Creating dwh PostgreSQL client");
    let dwh = Arc::new(PostgreSQLClient::new("dwh", config.dwh.clone()).await?);
    let destination = Arc::new(PostgreSQLAdapter::new_with_arc(dwh));

    Ok(DatabaseClients {
        source: source as Arc<dyn DatabaseClient>,
        destination: destination.clone() as Arc<dyn DatabaseClient>,
        event_store: destination as Arc<dyn EventStore>,
    })
}
