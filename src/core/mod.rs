//! Core business logic for the marketing loader.
//!
//! # Modules
//!
//! - [`load`] - Warehouse DDL, table loading, retries and run orchestration
//! - [`verification`] - Row-count integrity checks
//! - [`events`] - Success/failure event publishing
//! - [`service`] - The [`MarketingDataLoader`] facade used by the CLI
//!
//! # Load Workflow
//!
//! 1. **Reset**: Drop and recreate the warehouse schema and its tables
//! 2. **Load**: Copy every configured table concurrently, with retries
//! 3. **Aggregate**: Build a [`crate::domain::LoadSummary`]
//! 4. **Publish**: Emit a success or failure event
//! 5. **Verify**: On full success, compare source and warehouse row counts
//!
//! # Example
//!
//! ```rust,no_run
//! use marketing_loader::config::load_config;
//! use marketing_loader::core::MarketingDataLoader;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("marketing-loader.toml")?;
//! let mut loader = MarketingDataLoader::new(config);
//! loader.initialize().await?;
//!
//! let summary = loader.load_all().await?;
//! println!("Loaded {}/{} tables", summary.successful_tables, summary.total_tables);
//!
//! loader.close().await;
//! # Ok(())
//! # }
//! ```

pub mod events;
pub mod load;
pub mod service;
pub mod verification;

pub use service::MarketingDataLoader;
