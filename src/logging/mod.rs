//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output for interactive runs
//! - JSON-formatted file logs with daily or hourly rotation
//! - Configurable log levels, overridable through `RUST_LOG`
//!
//! # Example
//!
//! ```no_run
//! use marketing_loader::logging::init_logging;
//! use marketing_loader::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log a completed table load
///
/// # Example
///
/// ```no_run
/// use marketing_loader::log_table_loaded;
/// use std::time::Duration;
///
/// log_table_loaded!("closed_deal", 842, Duration::from_millis(310));
/// ```
#[macro_export]
macro_rules! log_table_loaded {
    ($table:expr, $records:expr, $duration:expr) => {
        tracing::info!(
            table = %$table,
            records_loaded = $records,
            duration_ms = $duration.as_millis() as u64,
            "Table loaded"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use marketing_loader::log_retry_attempt;
///
/// log_retry_attempt!("closed_deal", 2, 3, "connection reset");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($table:expr, $attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            table = %$table,
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying table load"
        );
    };
}
