//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{EventPublisherKind, LoaderConfig};
use super::secret::secret_string;
use crate::domain::errors::LoaderError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "MLOAD_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into LoaderConfig
/// 4. Applies environment variable overrides (MLOAD_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a configuration error if the file cannot be read or parsed, a
/// referenced environment variable is missing, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use marketing_loader::config::load_config;
///
/// let config = load_config("marketing-loader.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<LoaderConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LoaderError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        LoaderError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads configuration from TOML text; see [`load_config`]
pub fn load_config_from_str(contents: &str) -> Result<LoaderConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: LoaderConfig = toml::from_str(&contents)
        .map_err(|e| LoaderError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        LoaderError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| LoaderError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(LoaderError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_override(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{key}")).ok()
}

fn parse_override<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        LoaderError::Configuration(format!(
            "Invalid value '{value}' for environment variable {ENV_PREFIX}{key}"
        ))
    })
}

/// Applies environment variable overrides using the MLOAD_* prefix
///
/// Environment variables follow the pattern: MLOAD_<SECTION>_<KEY>,
/// for example MLOAD_LOAD_RETRY_ATTEMPTS or MLOAD_DWH_CONNECTION_STRING.
fn apply_env_overrides(config: &mut LoaderConfig) -> Result<()> {
    if let Some(val) = env_override("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Database overrides
    if let Some(val) = env_override("OLIST_CONNECTION_STRING") {
        config.olist.connection_string = secret_string(val);
    }
    if let Some(val) = env_override("OLIST_MAX_CONNECTIONS") {
        config.olist.max_connections = parse_override("OLIST_MAX_CONNECTIONS", &val)?;
    }
    if let Some(val) = env_override("DWH_CONNECTION_STRING") {
        config.dwh.connection_string = secret_string(val);
    }
    if let Some(val) = env_override("DWH_MAX_CONNECTIONS") {
        config.dwh.max_connections = parse_override("DWH_MAX_CONNECTIONS", &val)?;
    }

    // Load overrides
    if let Some(val) = env_override("LOAD_MAX_PARALLEL_TASKS") {
        config.load.max_parallel_tasks = parse_override("LOAD_MAX_PARALLEL_TASKS", &val)?;
    }
    if let Some(val) = env_override("LOAD_RETRY_ATTEMPTS") {
        config.load.retry_attempts = parse_override("LOAD_RETRY_ATTEMPTS", &val)?;
    }
    if let Some(val) = env_override("LOAD_RETRY_DELAY_SECONDS") {
        config.load.retry_delay_seconds = parse_override("LOAD_RETRY_DELAY_SECONDS", &val)?;
    }

    // Event overrides
    if let Some(val) = env_override("EVENTS_PUBLISHER") {
        config.events.publisher = match val.to_lowercase().as_str() {
            "database" => EventPublisherKind::Database,
            "file" => EventPublisherKind::File,
            _ => {
                return Err(LoaderError::Configuration(format!(
                    "Unknown event publisher type: {val}"
                )))
            }
        };
    }
    if let Some(val) = env_override("EVENTS_DIRECTORY") {
        config.events.directory = val;
    }

    // Logging overrides
    if let Some(val) = env_override("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
