//! Load events
//!
//! Events are write-once audit records describing the outcome of a load run.

use super::load::LoadSummary;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Kind of load event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventType {
    #[serde(rename = "marketing-data-loaded")]
    Loaded,
    #[serde(rename = "marketing-data-load-failed")]
    LoadFailed,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Loaded => "marketing-data-loaded",
            EventType::LoadFailed => "marketing-data-load-failed",
        }
    }
}

/// Event status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Success,
    Failure,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Success => "success",
            EventStatus::Failure => "failure",
        }
    }
}

/// Event body, flattened into the serialized event
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EventPayload {
    Success {
        results: LoadSummary,
    },
    Failure {
        error: String,
        /// The run summary, or an empty object when the run aborted
        details: serde_json::Value,
    },
}

/// A structured success/failure record for one load run
#[derive(Debug, Clone, Serialize)]
pub struct LoadEvent {
    pub event_type: EventType,

    pub status: EventStatus,

    pub timestamp: DateTime<Utc>,

    #[serde(flatten)]
    pub payload: EventPayload,
}

impl LoadEvent {
    /// Event for a run where every table loaded
    pub fn success(summary: &LoadSummary) -> Self {
        Self {
            event_type: EventType::Loaded,
            status: EventStatus::Success,
            timestamp: Utc::now(),
            payload: EventPayload::Success {
                results: summary.clone(),
            },
        }
    }

    /// Event for a run that failed or completed with errors
    pub fn failure(reason: impl Into<String>, details: Option<&LoadSummary>) -> Self {
        let details = details
            .and_then(|summary| serde_json::to_value(summary).ok())
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        Self {
            event_type: EventType::LoadFailed,
            status: EventStatus::Failure,
            timestamp: Utc::now(),
            payload: EventPayload::Failure {
                error: reason.into(),
                details,
            },
        }
    }

    /// Serializes the event to a JSON value
    pub fn to_json(&self) -> super::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LoadResult, TableSpec};
    use std::time::Duration;

    fn summary() -> LoadSummary {
        let spec = TableSpec::new("closed_deal", "marketing", "m_data").unwrap();
        LoadSummary::from_results(vec![LoadResult::success(spec, 3, Duration::ZERO)])
    }

    #[test]
    fn test_success_event_json() {
        let event = LoadEvent::success(&summary());
        let json = event.to_json().unwrap();

        assert_eq!(json["event_type"], "marketing-data-loaded");
        assert_eq!(json["status"], "success");
        assert!(json["timestamp"].is_string());
        assert_eq!(json["results"]["total_tables"], 1);
        assert_eq!(json["results"]["results"][0]["records_loaded"], 3);
    }

    #[test]
    fn test_failure_event_with_details() {
        let event = LoadEvent::failure("Marketing data load completed with errors", Some(&summary()));
        let json = event.to_json().unwrap();

        assert_eq!(json["event_type"], "marketing-data-load-failed");
        assert_eq!(json["status"], "failure");
        assert_eq!(json["error"], "Marketing data load completed with errors");
        assert_eq!(json["details"]["successful_tables"], 1);
    }

    #[test]
    fn test_failure_event_without_details() {
        let event = LoadEvent::failure("schema reset failed", None);
        let json = event.to_json().unwrap();

        assert_eq!(json["details"], serde_json::json!({}));
        assert_eq!(event.event_type.as_str(), "marketing-data-load-failed");
        assert_eq!(event.status.as_str(), "failure");
    }
}
