//! Load event publishing
//!
//! Two interchangeable sinks implement [`EventPublisher`]:
//! - [`DatabaseEventPublisher`] appends to `<target_schema>.marketing_load_events`
//! - [`FileEventPublisher`] writes one pretty-printed JSON file per event
//!
//! [`create_event_publisher`] selects one from configuration.

pub mod database;
pub mod factory;
pub mod file;
pub mod publisher;

pub use database::DatabaseEventPublisher;
pub use factory::create_event_publisher;
pub use file::FileEventPublisher;
pub use publisher::EventPublisher;
