//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod health;
pub mod init;
pub mod load;
pub mod validate;

/// Process exit codes
pub mod exit_codes {
    /// Command succeeded
    pub const SUCCESS: i32 = 0;
    /// One or more tables failed, or a database is unhealthy
    pub const FAILURE: i32 = 1;
    /// Configuration could not be loaded or is invalid
    pub const CONFIGURATION: i32 = 2;
    /// A database could not be reached
    pub const CONNECTION: i32 = 4;
    /// The run aborted
    pub const FATAL: i32 = 5;
}
