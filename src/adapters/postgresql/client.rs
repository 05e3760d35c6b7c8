//! PostgreSQL client implementation
//!
//! This module provides the pooled client used for both the olist source and
//! the dwh warehouse.

use crate::config::schema::PostgreSQLConfig;
use crate::config::secret::redact_connection_string;
use crate::domain::{LoaderError, Result};
use deadpool_postgres::{Manager, ManagerConfig, Object, Pool, RecyclingMethod};
use postgres_native_tls::MakeTlsConnector;
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::config::SslMode;
use tokio_postgres::types::ToSql;
use tokio_postgres::{NoTls, Row};

/// PostgreSQL client with a connection pool
///
/// Connections are opened lazily; creating a client never touches the
/// network.
pub struct PostgreSQLClient {
    /// Logical database name ("olist" or "dwh")
    name: String,

    /// Connection pool
    pool: Pool,

    /// Configuration
    config: PostgreSQLConfig,
}

impl PostgreSQLClient {
    /// Create a new PostgreSQL client
    ///
    /// # Arguments
    ///
    /// * `name` - Logical database name used in logs and health reports
    /// * `config` - PostgreSQL configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string is invalid or the pool
    /// cannot be built.
    pub async fn new(name: impl Into<String>, config: PostgreSQLConfig) -> Result<Self> {
        let name = name.into();

        let mut pg_config: tokio_postgres::Config =
            config.connection_string.expose_secret().parse().map_err(|e| {
                LoaderError::Configuration(format!(
                    "Invalid PostgreSQL connection string for {name}: {e}"
                ))
            })?;
        pg_config.ssl_mode(ssl_mode(&config.ssl_mode)?);

        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let manager = if config.ssl_mode == "disable" {
            Manager::from_config(pg_config, NoTls, manager_config)
        } else {
            let connector = native_tls::TlsConnector::builder().build().map_err(|e| {
                LoaderError::Connection(format!("Failed to build TLS connector: {e}"))
            })?;
            Manager::from_config(pg_config, MakeTlsConnector::new(connector), manager_config)
        };

        let timeout = Duration::from_secs(config.connection_timeout_seconds);
        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .wait_timeout(Some(timeout))
            .create_timeout(Some(timeout))
            .recycle_timeout(Some(timeout))
            .runtime(deadpool_postgres::Runtime::Tokio1)
            .build()
            .map_err(|e| {
                LoaderError::Connection(format!("Failed to create {name} connection pool: {e}"))
            })?;

        tracing::debug!(
            database = %name,
            target = %redact_connection_string(config.connection_string.expose_secret().as_ref()),
            max_connections = config.max_connections,
            "PostgreSQL pool created"
        );

        Ok(Self { name, pool, config })
    }

    /// Logical database name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Test the connection to PostgreSQL
    ///
    /// Attempts to get a connection from the pool and execute a simple query.
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.get_connection().await?;

        client.query_one("SELECT 1", &[]).await.map_err(|e| {
            LoaderError::Connection(format!("{} connection test failed: {}", self.name, e))
        })?;

        tracing::debug!(database = %self.name, "PostgreSQL connection test successful");
        Ok(())
    }

    /// Get a connection from the pool with the statement timeout applied
    ///
    /// # Errors
    ///
    /// Returns an error if a connection cannot be obtained.
    pub async fn get_connection(&self) -> Result<Object> {
        let client = self.pool.get().await.map_err(|e| {
            LoaderError::Connection(format!(
                "Failed to get {} connection from pool: {}",
                self.name, e
            ))
        })?;

        client
            .batch_execute(&statement_timeout(self.config.statement_timeout_seconds))
            .await
            .map_err(|e| LoaderError::Database(format!("Failed to set statement timeout: {e}")))?;

        Ok(client)
    }

    /// Execute a query and return rows
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn query(&self, query: &str, params: &[&(dyn ToSql + Sync)]) -> Result<Vec<Row>> {
        let client = self.get_connection().await?;

        client
            .query(query, params)
            .await
            .map_err(|e| LoaderError::Database(format!("Query failed on {}: {}", self.name, e)))
    }

    /// Execute a statement and return the number of affected rows
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub async fn execute(&self, statement: &str, params: &[&(dyn ToSql + Sync)]) -> Result<u64> {
        let client = self.get_connection().await?;

        client.execute(statement, params).await.map_err(|e| {
            LoaderError::Database(format!(
                "Statement execution failed on {}: {}",
                self.name, e
            ))
        })
    }

    /// Close the pool; checked-out connections are dropped when returned
    pub fn close(&self) {
        self.pool.close();
        tracing::debug!(database = %self.name, "PostgreSQL pool closed");
    }

    /// Get the connection string (without credentials)
    pub fn connection_string_safe(&self) -> String {
        redact_connection_string(self.config.connection_string.expose_secret().as_ref())
    }

    /// Get the pool statistics
    pub fn pool_status(&self) -> deadpool_postgres::Status {
        self.pool.status()
    }
}

/// `SET statement_timeout` in milliseconds; 0 disables the timeout
fn statement_timeout(seconds: u64) -> String {
    format!("SET statement_timeout = {}", seconds.saturating_mul(1000))
}

fn ssl_mode(mode: &str) -> Result<SslMode> {
    match mode {
        "disable" => Ok(SslMode::Disable),
        "prefer" => Ok(SslMode::Prefer),
        "require" => Ok(SslMode::Require),
        other => Err(LoaderError::Configuration(format!(
            "Unsupported ssl_mode '{other}'"
        ))),
    }
}
