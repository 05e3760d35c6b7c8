// Marketing Loader - olist marketing data to the warehouse
// Copyright (c) 2025 Marketing Loader Contributors
// Licensed under the MIT License

use clap::Parser;
use marketing_loader::cli::commands::exit_codes;
use marketing_loader::cli::{Cli, Commands};
use marketing_loader::config::{load_config, LoggingConfig};
use marketing_loader::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let (log_level, logging_config) = logging_settings(&cli);
    // Keep the guard alive until exit so file logs are flushed
    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(exit_codes::FATAL);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Marketing Loader - olist marketing data to the warehouse"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            exit_codes::FATAL
        }
    };

    drop(guard);
    process::exit(exit_code);
}

/// Log level and logging configuration for this invocation
///
/// Commands that read the configuration file log the way it says; the
/// others, and an unreadable file, fall back to console-only logging.
fn logging_settings(cli: &Cli) -> (String, LoggingConfig) {
    let config = if cli.command.uses_config() {
        load_config(&cli.config).ok()
    } else {
        None
    };

    match config {
        Some(config) => (
            cli.log_level
                .clone()
                .unwrap_or(config.application.log_level),
            config.logging,
        ),
        None => (
            cli.log_level.clone().unwrap_or_else(|| "info".to_string()),
            LoggingConfig::console_only(),
        ),
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Load(args) => args.execute(&cli.config).await,
        Commands::Health(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
