//! Event publisher writing one JSON file per event

use super::publisher::EventPublisher;
use crate::domain::{LoadEvent, LoaderError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Writes each event to `<directory>/<event_type>_<YYYYmmdd_HHMMSS_micros>.json`
pub struct FileEventPublisher {
    directory: PathBuf,
}

impl FileEventPublisher {
    /// Create a publisher, creating `directory` if it does not exist
    ///
    /// A directory that cannot be created is logged; the failure then
    /// surfaces (and is swallowed) on publish.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        let directory = directory.into();
        if let Err(e) = std::fs::create_dir_all(&directory) {
            tracing::warn!(
                directory = %directory.display(),
                error = %e,
                "Failed to create event directory"
            );
        }
        Self { directory }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File name for an event
    pub fn file_name(event: &LoadEvent) -> String {
        format!(
            "{}_{}.json",
            event.event_type.as_str(),
            event.timestamp.format("%Y%m%d_%H%M%S_%6f")
        )
    }

    /// Write the event and return the path written
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be serialized or written.
    pub async fn write_event(&self, event: &LoadEvent) -> Result<PathBuf> {
        let path = self.directory.join(Self::file_name(event));
        let contents = serde_json::to_string_pretty(event)?;

        tokio::fs::write(&path, contents).await.map_err(|e| {
            LoaderError::Event(format!(
                "Failed to write event file {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::debug!(path = %path.display(), "Event written");
        Ok(path)
    }
}

#[async_trait]
impl EventPublisher for FileEventPublisher {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn record(&self, event: &LoadEvent) -> Result<()> {
        self.write_event(event).await.map(|_| ())
    }
}
