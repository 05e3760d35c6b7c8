//! Table loading
//!
//! This module provides:
//! - Warehouse table definitions ([`ddl`])
//! - Single-table extract and load ([`TableLoader`])
//! - Retries with linear backoff ([`load_with_retry`])
//! - Run orchestration ([`LoadOrchestrator`])

pub mod ddl;
pub mod orchestrator;
pub mod retry;
pub mod table_loader;

pub use orchestrator::LoadOrchestrator;
pub use retry::{load_with_retry, RetryPolicy};
pub use table_loader::{DatabaseTableLoader, TableLoader};
