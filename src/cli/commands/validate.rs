//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the loader configuration file.

use super::exit_codes;
use crate::config::secret::redact_connection_string;
use crate::config::{load_config, LoaderConfig};
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading also validates
        match load_config(config_path) {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!();
                print!("{}", format_config_summary(&config));
                Ok(exit_codes::SUCCESS)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(exit_codes::CONFIGURATION)
            }
        }
    }
}

/// Configuration summary with credentials redacted
pub fn format_config_summary(config: &LoaderConfig) -> String {
    let mut out = String::from("Configuration Summary:\n");
    out.push_str(&format!("  Log Level: {}\n", config.application.log_level));
    out.push_str(&format!(
        "  Source (olist): {}\n",
        redact_connection_string(config.olist.connection_string.expose_secret().as_ref())
    ));
    out.push_str(&format!(
        "  Warehouse (dwh): {}\n",
        redact_connection_string(config.dwh.connection_string.expose_secret().as_ref())
    ));
    out.push_str(&format!(
        "  Tables: {} ({} -> {})\n",
        config.load.tables.join(", "),
        config.load.source_schema,
        config.load.target_schema
    ));
    out.push_str(&format!(
        "  Max Parallel Tasks: {}\n",
        config.load.max_parallel_tasks
    ));
    out.push_str(&format!(
        "  Retries: {} attempts, {}s base delay\n",
        config.load.retry_attempts, config.load.retry_delay_seconds
    ));
    out.push_str(&format!(
        "  Event Publisher: {:?}\n",
        config.events.publisher
    ));
    out
}
