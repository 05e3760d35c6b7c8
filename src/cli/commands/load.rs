//! Load command implementation
//!
//! This module implements the `load` command, which runs one complete
//! marketing data load and prints the outcome.

use super::exit_codes;
use crate::config::load_config;
use crate::core::MarketingDataLoader;
use crate::domain::LoadSummary;
use clap::Args;

/// Arguments for the load command
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Print the load summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl LoadArgs {
    /// Execute the load command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting load command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(exit_codes::CONFIGURATION);
            }
        };

        let mut loader = MarketingDataLoader::new(config);
        if let Err(e) = loader.initialize().await {
            tracing::error!(error = %e, "Failed to initialize loader");
            eprintln!("Failed to connect: {e}");
            loader.close().await;
            return Ok(exit_codes::CONNECTION);
        }

        let outcome = loader.load_all().await;
        loader.close().await;

        let summary = match outcome {
            Ok(summary) => summary,
            Err(e) => {
                eprintln!("❌ Load failed: {e}");
                return Ok(exit_codes::FATAL);
            }
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print!("{}", format_summary(&summary));
        }

        Ok(if summary.has_failures() {
            exit_codes::FAILURE
        } else {
            exit_codes::SUCCESS
        })
    }
}

/// Human-readable report of a load run
pub fn format_summary(summary: &LoadSummary) -> String {
    let mut out = String::new();

    if summary.has_failures() {
        out.push_str("❌ Load completed with errors:\n");
    } else {
        out.push_str("✅ Load completed successfully:\n");
    }
    out.push_str(&format!("  Total tables: {}\n", summary.total_tables));
    out.push_str(&format!("  Successful: {}\n", summary.successful_tables));
    out.push_str(&format!("  Failed: {}\n", summary.failed_tables));

    for result in &summary.results {
        match result.records_loaded() {
            Some(records) if result.is_success() => out.push_str(&format!(
                "  {}: {} records in {:.2}s\n",
                result.table(),
                records,
                result.duration().as_secs_f64()
            )),
            _ => out.push_str(&format!(
                "  {}: FAILED - {}\n",
                result.table(),
                result.error_message().unwrap_or("unknown error")
            )),
        }
    }

    if let Some(checks) = &summary.integrity_checks {
        out.push_str("\nData integrity checks:\n");
        for check in checks {
            let status = if check.integrity_ok { "PASS" } else { "FAIL" };
            out.push_str(&format!("  {}: {}\n", check.table, status));
        }
    }

    out
}
