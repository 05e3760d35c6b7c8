// Marketing Loader - olist marketing data to the warehouse
// Copyright (c) 2025 Marketing Loader Contributors
// Licensed under the MIT License

//! # Marketing Loader
//!
//! Copies the olist marketing tables (`closed_deal`, `marketing_qualified_lead`)
//! into the data warehouse, replacing the warehouse copy on every run.
//!
//! ## Overview
//!
//! A load run:
//! - **Resets** the warehouse schema and recreates one table per source table
//! - **Loads** every table concurrently, retrying failed tables with linear backoff
//! - **Reports** a [`domain::LoadSummary`] with per-table results
//! - **Publishes** a success or failure event to a table or to JSON files
//! - **Verifies** row-count parity after a fully successful load
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (load orchestration, verification, events)
//! - [`adapters`] - Database integrations (PostgreSQL)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use marketing_loader::config::load_config;
//! use marketing_loader::core::MarketingDataLoader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("marketing-loader.toml")?;
//!
//!     let mut loader = MarketingDataLoader::new(config);
//!     loader.initialize().await?;
//!
//!     let summary = loader.load_all().await?;
//!     println!(
//!         "Loaded {} records into {} tables",
//!         summary.total_records_loaded(),
//!         summary.successful_tables
//!     );
//!
//!     loader.close().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All library errors are [`domain::LoaderError`]. Per-table failures never
//! surface as errors: they are recorded in the summary. Only a failed schema
//! reset aborts a run.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
