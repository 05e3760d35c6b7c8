//! Subscriber setup
//!
//! The console always gets human-readable lines. When `logging.local_enabled`
//! is set, the same events are also written as JSON to a rolling file under
//! `logging.local_path`.
//!
//! ```no_run
//! use marketing_loader::config::LoggingConfig;
//! use marketing_loader::logging::init_logging;
//!
//! let _guard = init_logging("info", &LoggingConfig::console_only()).unwrap();
//! ```

use crate::config::LoggingConfig;
use crate::domain::{LoaderError, Result};
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// File name prefix for the rotated log files
pub const LOG_FILE_NAME: &str = "marketing-loader.log";

/// Flushes the file log when dropped; hold it until the process exits
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber
///
/// `RUST_LOG` overrides `level` when set.
///
/// # Errors
///
/// Returns a configuration error for an unknown level, a log directory that
/// cannot be created, or a subscriber that is already installed.
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(level)?;

    let console = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_filter(env_filter(level))
        .boxed();

    let (file, guard) = if config.local_enabled {
        let (writer, guard) = rolling_writer(config)?;
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(writer)
            .with_filter(env_filter(level))
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| LoaderError::Configuration(format!("Failed to initialize logging: {e}")))?;

    tracing::debug!(
        local_enabled = config.local_enabled,
        local_path = %config.local_path,
        "Logging initialized"
    );

    Ok(LoggingGuard { _file: guard })
}

fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("marketing_loader={level}")))
}

fn rotation(name: &str) -> Rotation {
    match name {
        "hourly" => Rotation::HOURLY,
        _ => Rotation::DAILY,
    }
}

fn rolling_writer(config: &LoggingConfig) -> Result<(NonBlocking, WorkerGuard)> {
    let directory = Path::new(&config.local_path);
    std::fs::create_dir_all(directory).map_err(|e| {
        LoaderError::Configuration(format!(
            "Failed to create log directory {}: {}",
            directory.display(),
            e
        ))
    })?;

    let appender = RollingFileAppender::new(
        rotation(&config.local_rotation),
        directory,
        LOG_FILE_NAME,
    );
    Ok(tracing_appender::non_blocking(appender))
}

/// Parse a level name, case-insensitively
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(LoaderError::Configuration(format!(
            "Invalid log level: {level}. Must be one of: trace, debug, info, warn, error"
        ))),
    }
}
