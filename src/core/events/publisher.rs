//! Event publisher abstraction

use crate::domain::{LoadEvent, LoadSummary, Result};
use async_trait::async_trait;

/// Records load events
///
/// Implementations only provide [`EventPublisher::record`]. The publish
/// methods wrap it so that a failure to record an event is logged and
/// swallowed: losing an audit record never fails a load.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Short name of the sink, used in logs
    fn name(&self) -> &'static str;

    /// Persist one event
    ///
    /// # Errors
    ///
    /// Returns an error if the event could not be stored.
    async fn record(&self, event: &LoadEvent) -> Result<()>;

    /// Publish a `marketing-data-loaded` event carrying the run summary
    async fn publish_success(&self, summary: &LoadSummary) {
        let event = LoadEvent::success(summary);
        let outcome = self.record(&event).await;
        log_outcome(self.name(), &event, outcome);
    }

    /// Publish a `marketing-data-load-failed` event
    ///
    /// `details` is the run summary when one exists; without it the event
    /// carries an empty details object.
    async fn publish_failure(&self, reason: &str, details: Option<&LoadSummary>) {
        let event = LoadEvent::failure(reason, details);
        let outcome = self.record(&event).await;
        log_outcome(self.name(), &event, outcome);
    }
}

fn log_outcome(publisher: &str, event: &LoadEvent, outcome: Result<()>) {
    match outcome {
        Ok(()) => tracing::info!(
            publisher,
            event_type = event.event_type.as_str(),
            status = event.status.as_str(),
            "Load event published"
        ),
        Err(e) => tracing::error!(
            publisher,
            event_type = event.event_type.as_str(),
            error = %e,
            "Failed to publish load event"
        ),
    }
}
