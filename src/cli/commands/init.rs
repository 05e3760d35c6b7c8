//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::exit_codes;
use clap::Args;
use std::fs;
use std::path::Path;

/// Sample configuration written by `init`
pub const SAMPLE_CONFIG: &str = r#"# Marketing Loader Configuration
# Copies olist marketing tables into the data warehouse

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Source database holding the marketing schema
[olist]
connection_string = "${OLIST_DATABASE_URL}"
max_connections = 10
connection_timeout_seconds = 30
statement_timeout_seconds = 60
ssl_mode = "prefer"  # disable | prefer | require

# Warehouse database; the target schema is dropped and rebuilt on every load
[dwh]
connection_string = "${DWH_DATABASE_URL}"
max_connections = 10
connection_timeout_seconds = 30
statement_timeout_seconds = 60
ssl_mode = "prefer"

[load]
tables = ["closed_deal", "marketing_qualified_lead"]
source_schema = "marketing"
target_schema = "m_data"
max_parallel_tasks = 5
retry_attempts = 3
# Linear backoff: attempt k waits retry_delay_seconds * k
retry_delay_seconds = 1.0

[events]
publisher = "database"  # database | file
# Used by the file publisher
directory = "./events"

[logging]
local_enabled = true
local_path = "./logs"
local_rotation = "daily"  # daily | hourly
"#;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "marketing-loader.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(exit_codes::CONFIGURATION);
        }

        match fs::write(&self.output, SAMPLE_CONFIG) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set OLIST_DATABASE_URL and DWH_DATABASE_URL (or use a .env file)");
                println!("  2. Validate configuration: marketing-loader validate-config");
                println!("  3. Run a load: marketing-loader load");
                println!();
                Ok(exit_codes::SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(exit_codes::FATAL)
            }
        }
    }
}
