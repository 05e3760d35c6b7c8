//! External system integrations for the marketing loader.
//!
//! - [`database`] - Database abstraction layer (trait-based)
//! - [`postgresql`] - PostgreSQL implementation
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with in-memory implementations. The load pipeline only sees
//! the [`database::DatabaseClient`] and [`database::EventStore`] traits.
//!
//! ```rust,no_run
//! use marketing_loader::adapters::database::create_database_clients;
//! use marketing_loader::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("marketing-loader.toml")?;
//! let clients = create_database_clients(&config).await?;
//! clients.source.test_connection().await?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod postgresql;
