//! Post-load verification
//!
//! Compares row counts between each source relation and its warehouse copy.

pub mod integrity;

pub use integrity::IntegrityChecker;
