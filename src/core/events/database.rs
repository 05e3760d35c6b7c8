//! Event publisher backed by a warehouse table

use super::publisher::EventPublisher;
use crate::adapters::database::EventStore;
use crate::domain::{LoadEvent, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Appends events to the event log relation, creating it on first use
pub struct DatabaseEventPublisher {
    store: Arc<dyn EventStore>,
    relation: String,
}

impl DatabaseEventPublisher {
    /// `relation` must be a validated, schema-qualified name
    pub fn new(store: Arc<dyn EventStore>, relation: impl Into<String>) -> Self {
        Self {
            store,
            relation: relation.into(),
        }
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }
}

#[async_trait]
impl EventPublisher for DatabaseEventPublisher {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn record(&self, event: &LoadEvent) -> Result<()> {
        self.store.ensure_event_log(&self.relation).await?;
        self.store.append_event(&self.relation, event).await
    }
}
