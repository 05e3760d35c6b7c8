//! Configuration management for the marketing loader.
//!
//! # Overview
//!
//! Configuration is read from a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `MLOAD_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation of every field on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [olist]
//! connection_string = "${OLIST_DATABASE_URL}"
//!
//! [dwh]
//! connection_string = "${DWH_DATABASE_URL}"
//!
//! [load]
//! tables = ["closed_deal", "marketing_qualified_lead"]
//! max_parallel_tasks = 5
//! retry_attempts = 3
//! retry_delay_seconds = 1.0
//!
//! [events]
//! publisher = "database"
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use marketing_loader::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("marketing-loader.toml")?;
//! println!("Loading {} tables", config.load.tables.len());
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str};
pub use schema::{
    ApplicationConfig, EventPublisherKind, EventsConfig, LoadConfig, LoaderConfig, LoggingConfig,
    PostgreSQLConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
