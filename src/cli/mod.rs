//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the marketing loader
//! using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Marketing Loader - olist marketing data to the warehouse
#[derive(Parser, Debug)]
#[command(name = "marketing-loader")]
#[command(version, about, long_about = None)]
#[command(author = "Marketing Loader Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = "marketing-loader.toml",
        env = "MLOAD_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MLOAD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load all configured tables into the warehouse
    Load(commands::load::LoadArgs),

    /// Check connectivity to both databases
    Health(commands::health::HealthArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Commands {
    /// Returns true for commands whose logging follows the configuration file
    pub fn uses_config(&self) -> bool {
        matches!(self, Commands::Load(_) | Commands::Health(_))
    }
}
