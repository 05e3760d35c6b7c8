//! Domain models and types for the marketing loader.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Table specifications** ([`TableSpec`]) with validated relation names
//! - **Extracted rows** ([`TableData`], [`Row`])
//! - **Load outcomes** ([`LoadResult`], [`LoadSummary`], [`IntegrityCheck`])
//! - **Audit events** ([`LoadEvent`])
//! - **Health reports** ([`HealthReport`])
//! - **Error types** ([`LoaderError`]) and the [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use marketing_loader::domain::{LoadResult, LoadSummary, TableSpec};
//! use std::time::Duration;
//!
//! # fn example() -> marketing_loader::domain::Result<()> {
//! let spec = TableSpec::new("closed_deal", "marketing", "m_data")?;
//! let summary = LoadSummary::from_results(vec![
//!     LoadResult::success(spec, 3, Duration::from_millis(40)),
//! ]);
//! assert_eq!(summary.successful_tables, 1);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod event;
pub mod health;
pub mod load;
pub mod result;
pub mod rows;
pub mod table;

// Re-export commonly used types for convenience
pub use errors::LoaderError;
pub use event::{EventPayload, EventStatus, EventType, LoadEvent};
pub use health::{DatabaseHealth, HealthReport, ServiceStatus};
pub use load::{IntegrityCheck, LoadResult, LoadStatus, LoadSummary};
pub use result::Result;
pub use rows::{Row, TableData};
pub use table::TableSpec;
