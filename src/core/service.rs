//! Marketing data loader service
//!
//! Owns the database clients and the orchestrator for the lifetime of the
//! process: initialize once, run loads, report health, close.

use crate::adapters::database::{create_database_clients, DatabaseClient, DatabaseClients};
use crate::config::LoaderConfig;
use crate::core::events::create_event_publisher;
use crate::core::load::LoadOrchestrator;
use crate::domain::{DatabaseHealth, HealthReport, LoadSummary, LoaderError, Result};

/// Entry point for loading marketing data into the warehouse
pub struct MarketingDataLoader {
    config: LoaderConfig,
    clients: Option<DatabaseClients>,
    orchestrator: Option<LoadOrchestrator>,
}

impl MarketingDataLoader {
    /// Create an uninitialized loader
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            clients: None,
            orchestrator: None,
        }
    }

    /// Create a loader over existing database clients, ready to run
    ///
    /// # Errors
    ///
    /// Returns an error if the orchestrator cannot be built from `config`.
    pub fn with_databases(config: LoaderConfig, clients: DatabaseClients) -> Result<Self> {
        let mut loader = Self::new(config);
        loader.attach(clients)?;
        Ok(loader)
    }

    /// Returns true once database clients are attached
    pub fn is_initialized(&self) -> bool {
        self.orchestrator.is_some()
    }

    /// Create the connection pools without touching the network
    ///
    /// Calling this on a loader that already has clients does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if a pool cannot be created from configuration.
    pub async fn connect(&mut self) -> Result<()> {
        if self.is_initialized() {
            return Ok(());
        }

        let clients = create_database_clients(&self.config).await?;
        self.attach(clients)
    }

    /// Connect to both databases and verify they answer
    ///
    /// # Errors
    ///
    /// Returns a connection error if either database is unreachable.
    pub async fn initialize(&mut self) -> Result<()> {
        tracing::info!("Initializing marketing data loader");
        self.connect().await?;

        let clients = self.clients.as_ref().ok_or_else(|| {
            LoaderError::Connection("Database clients were not created".to_string())
        })?;

        for client in [&clients.source, &clients.destination] {
            client.test_connection().await.map_err(|e| match e {
                LoaderError::Connection(_) => e,
                other => LoaderError::Connection(format!(
                    "{} database unavailable: {}",
                    client.database_name(),
                    other
                )),
            })?;
        }

        tracing::info!("Marketing data loader initialized");
        Ok(())
    }

    fn attach(&mut self, clients: DatabaseClients) -> Result<()> {
        let publisher = create_event_publisher(
            &self.config.events,
            &self.config.load.target_schema,
            clients.event_store.clone(),
        )?;
        let orchestrator = LoadOrchestrator::new(&self.config.load, &clients, publisher)?;

        self.orchestrator = Some(orchestrator);
        self.clients = Some(clients);
        Ok(())
    }

    /// Run one complete load
    ///
    /// # Errors
    ///
    /// Returns an error if the loader is not initialized or the warehouse
    /// schema cannot be reset.
    pub async fn load_all(&self) -> Result<LoadSummary> {
        let orchestrator = self.orchestrator.as_ref().ok_or_else(|| {
            LoaderError::Other("Marketing data loader is not initialized".to_string())
        })?;

        orchestrator.load_all().await
    }

    /// Check both databases with a trivial query
    pub async fn health_check(&self) -> HealthReport {
        let Some(clients) = &self.clients else {
            let reason = "not initialized".to_string();
            return HealthReport::new(
                DatabaseHealth::Unhealthy(reason.clone()),
                DatabaseHealth::Unhealthy(reason),
            );
        };

        let (olist, dwh) = tokio::join!(
            database_health(clients.source.as_ref()),
            database_health(clients.destination.as_ref())
        );

        HealthReport::new(olist, dwh)
    }

    /// Close both connection pools
    pub async fn close(&mut self) {
        self.orchestrator = None;
        if let Some(clients) = self.clients.take() {
            clients.source.close().await;
            clients.destination.close().await;
            tracing::info!("Database connections closed");
        }
    }
}

async fn database_health(client: &dyn DatabaseClient) -> DatabaseHealth {
    match client.test_connection().await {
        Ok(()) => DatabaseHealth::Healthy,
        Err(e) => {
            tracing::warn!(database = client.database_name(), error = %e, "Health check failed");
            DatabaseHealth::Unhealthy(e.to_string())
        }
    }
}
