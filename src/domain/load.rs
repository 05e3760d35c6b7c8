//! Load results and run summaries
//!
//! A [`LoadResult`] is produced once per table per run and is never mutated
//! afterwards. A [`LoadSummary`] aggregates the results of one run.

use super::table::TableSpec;
use serde::{Serialize, Serializer};
use std::time::Duration;

/// Final status of one table load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    /// All rows were copied
    Success,
    /// The load failed; the destination was left untouched
    Error,
}

/// Outcome of loading a single table
#[derive(Debug, Clone, Serialize)]
pub struct LoadResult {
    table: TableSpec,

    status: LoadStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    records_loaded: Option<u64>,

    #[serde(serialize_with = "serialize_secs")]
    duration: Duration,

    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl LoadResult {
    /// A successful load of `records_loaded` rows
    pub fn success(table: TableSpec, records_loaded: u64, duration: Duration) -> Self {
        Self {
            table,
            status: LoadStatus::Success,
            records_loaded: Some(records_loaded),
            duration,
            error: None,
        }
    }

    /// A failed load
    pub fn error(table: TableSpec, error: impl Into<String>, duration: Duration) -> Self {
        Self {
            table,
            status: LoadStatus::Error,
            records_loaded: None,
            duration,
            error: Some(error.into()),
        }
    }

    pub fn table(&self) -> &TableSpec {
        &self.table
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == LoadStatus::Success
    }

    /// Rows loaded, present only on success
    pub fn records_loaded(&self) -> Option<u64> {
        self.records_loaded
    }

    /// Wall-clock time from call start to completion or failure
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Error message, present only on failure
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Row-count parity result for one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityCheck {
    /// Table name
    pub table: String,

    /// True when source and destination row counts match
    pub integrity_ok: bool,
}

impl IntegrityCheck {
    pub fn new(table: &TableSpec, integrity_ok: bool) -> Self {
        Self {
            table: table.name().to_string(),
            integrity_ok,
        }
    }
}

/// Summary of one load run
///
/// `successful_tables + failed_tables == total_tables` always holds, and
/// `integrity_checks` is only ever attached to a summary with no failures.
#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    pub total_tables: usize,

    pub successful_tables: usize,

    pub failed_tables: usize,

    /// Per-table results in configured table order
    pub results: Vec<LoadResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity_checks: Option<Vec<IntegrityCheck>>,
}

impl LoadSummary {
    /// Aggregates per-table results
    pub fn from_results(results: Vec<LoadResult>) -> Self {
        let successful_tables = results.iter().filter(|r| r.is_success()).count();

        Self {
            total_tables: results.len(),
            successful_tables,
            failed_tables: results.len() - successful_tables,
            results,
            integrity_checks: None,
        }
    }

    /// Returns true if any table failed to load
    pub fn has_failures(&self) -> bool {
        self.failed_tables > 0
    }

    /// Attaches integrity checks to a fully successful summary
    ///
    /// Checks are dropped if the summary has failures.
    pub fn with_integrity_checks(mut self, checks: Vec<IntegrityCheck>) -> Self {
        if self.has_failures() {
            tracing::warn!(
                failed_tables = self.failed_tables,
                "Ignoring integrity checks for a load with failed tables"
            );
            return self;
        }
        self.integrity_checks = Some(checks);
        self
    }

    /// Total rows copied across successful tables
    pub fn total_records_loaded(&self) -> u64 {
        self.results.iter().filter_map(|r| r.records_loaded()).sum()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_tables = self.total_tables,
            successful = self.successful_tables,
            failed = self.failed_tables,
            records_loaded = self.total_records_loaded(),
            "Marketing data load completed"
        );

        for result in self.results.iter().filter(|r| !r.is_success()) {
            tracing::warn!(
                table = %result.table(),
                error = result.error_message().unwrap_or_default(),
                "Table load failed"
            );
        }

        if let Some(checks) = &self.integrity_checks {
            for check in checks.iter().filter(|c| !c.integrity_ok) {
                tracing::warn!(table = %check.table, "Integrity check failed");
            }
        }
    }
}

fn serialize_secs<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str) -> TableSpec {
        TableSpec::new(name, "marketing", "m_data").unwrap()
    }

    #[test]
    fn test_success_result() {
        let result = LoadResult::success(spec("closed_deal"), 3, Duration::from_millis(1500));

        assert!(result.is_success());
        assert_eq!(result.status(), LoadStatus::Success);
        assert_eq!(result.records_loaded(), Some(3));
        assert!(result.error_message().is_none());
        assert_eq!(result.duration(), Duration::from_millis(1500));
    }

    #[test]
    fn test_error_result() {
        let result = LoadResult::error(spec("closed_deal"), "connection refused", Duration::ZERO);

        assert!(!result.is_success());
        assert_eq!(result.records_loaded(), None);
        assert_eq!(result.error_message(), Some("connection refused"));
    }

    #[test]
    fn test_summary_counts() {
        let summary = LoadSummary::from_results(vec![
            LoadResult::success(spec("closed_deal"), 3, Duration::ZERO),
            LoadResult::error(spec("marketing_qualified_lead"), "boom", Duration::ZERO),
            LoadResult::success(spec("seller"), 0, Duration::ZERO),
        ]);

        assert_eq!(summary.total_tables, 3);
        assert_eq!(summary.successful_tables, 2);
        assert_eq!(summary.failed_tables, 1);
        assert_eq!(
            summary.successful_tables + summary.failed_tables,
            summary.total_tables
        );
        assert!(summary.has_failures());
        assert_eq!(summary.total_records_loaded(), 3);
    }

    #[test]
    fn test_empty_summary() {
        let summary = LoadSummary::from_results(Vec::new());
        assert_eq!(summary.total_tables, 0);
        assert!(!summary.has_failures());
    }

    #[test]
    fn test_integrity_checks_only_on_success() {
        let failed = LoadSummary::from_results(vec![LoadResult::error(
            spec("closed_deal"),
            "boom",
            Duration::ZERO,
        )])
        .with_integrity_checks(vec![IntegrityCheck::new(&spec("closed_deal"), true)]);
        assert!(failed.integrity_checks.is_none());

        let ok = LoadSummary::from_results(vec![LoadResult::success(
            spec("closed_deal"),
            1,
            Duration::ZERO,
        )])
        .with_integrity_checks(vec![IntegrityCheck::new(&spec("closed_deal"), true)]);
        assert_eq!(ok.integrity_checks.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_summary_serialization() {
        let summary = LoadSummary::from_results(vec![
            LoadResult::success(spec("closed_deal"), 3, Duration::from_millis(250)),
            LoadResult::error(spec("marketing_qualified_lead"), "boom", Duration::ZERO),
        ]);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_tables"], 2);
        assert_eq!(json["results"][0]["table"], "closed_deal");
        assert_eq!(json["results"][0]["status"], "success");
        assert_eq!(json["results"][0]["records_loaded"], 3);
        assert_eq!(json["results"][0]["duration"], 0.25);
        assert!(json["results"][0].get("error").is_none());
        assert_eq!(json["results"][1]["status"], "error");
        assert_eq!(json["results"][1]["error"], "boom");
        assert!(json["results"][1].get("records_loaded").is_none());
        assert!(json.get("integrity_checks").is_none());
    }
}
