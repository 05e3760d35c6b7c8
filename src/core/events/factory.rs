//! Event publisher factory

use super::database::DatabaseEventPublisher;
use super::file::FileEventPublisher;
use super::publisher::EventPublisher;
use crate::adapters::database::EventStore;
use crate::config::{EventPublisherKind, EventsConfig};
use crate::core::load::ddl;
use crate::domain::Result;
use std::sync::Arc;

/// Create the event publisher selected by configuration
///
/// The database publisher writes to the event log relation in `target_schema`
/// through `store`; the file publisher ignores both.
///
/// # Errors
///
/// Returns a validation error if `target_schema` is not a valid identifier
pub fn create_event_publisher(
    config: &EventsConfig,
    target_schema: &str,
    store: Arc<dyn EventStore>,
) -> Result<Arc<dyn EventPublisher>> {
    match config.publisher {
        EventPublisherKind::Database => {
            let relation = ddl::event_log_relation(target_schema)?;
            tracing::debug!(relation = %relation, "Using database event publisher");
            Ok(Arc::new(DatabaseEventPublisher::new(store, relation)))
        }
        EventPublisherKind::File => {
            tracing::debug!(directory = %config.directory, "Using file event publisher");
            Ok(Arc::new(FileEventPublisher::new(&config.directory)))
        }
    }
}
