//! PostgreSQL database integration
//!
//! This module provides the pooled PostgreSQL client and the adapter that
//! exposes it through the database traits.

pub mod adapter;
pub mod client;

pub use adapter::PostgreSQLAdapter;
pub use client::PostgreSQLClient;
