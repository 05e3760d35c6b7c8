//! Database abstraction layer
//!
//! This module provides a trait-based abstraction for database operations,
//! so the load pipeline can run against PostgreSQL or an in-memory fake.

pub mod factory;
pub mod traits;

pub use factory::{create_database_clients, DatabaseClients};
pub use traits::{DatabaseClient, EventStore};
