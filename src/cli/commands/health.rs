//! Health command implementation
//!
//! Checks that both databases answer a trivial query.

use super::exit_codes;
use crate::config::load_config;
use crate::core::MarketingDataLoader;
use crate::domain::HealthReport;
use clap::Args;

/// Arguments for the health command
#[derive(Args, Debug)]
pub struct HealthArgs {
    /// Print the health report as JSON
    #[arg(long)]
    pub json: bool,
}

impl HealthArgs {
    /// Execute the health command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(exit_codes::CONFIGURATION);
            }
        };

        let mut loader = MarketingDataLoader::new(config);
        if let Err(e) = loader.connect().await {
            eprintln!("Health check failed: {e}");
            return Ok(exit_codes::CONNECTION);
        }

        let report = loader.health_check().await;
        loader.close().await;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", format_report(&report));
        }

        Ok(if report.is_healthy() {
            exit_codes::SUCCESS
        } else {
            exit_codes::FAILURE
        })
    }
}

/// Human-readable health report
pub fn format_report(report: &HealthReport) -> String {
    let status = if report.is_healthy() {
        "healthy"
    } else {
        "unhealthy"
    };

    format!(
        "Service: {}\nStatus: {}\nDatabase connections:\n  olist: {}\n  dwh: {}\n",
        report.service, status, report.databases.olist, report.databases.dwh
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DatabaseHealth;

    #[test]
    fn test_format_report() {
        let report = HealthReport::new(
            DatabaseHealth::Healthy,
            DatabaseHealth::Unhealthy("connection refused".to_string()),
        );

        let text = format_report(&report);
        assert!(text.starts_with("Service: marketing-data-loader\n"));
        assert!(text.contains("Status: unhealthy"));
        assert!(text.contains("  olist: healthy"));
        assert!(text.contains("  dwh: unhealthy: connection refused"));
    }
}
