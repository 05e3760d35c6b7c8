//! Health reporting for the two databases

use serde::Serialize;

/// Service name reported by health checks
pub const SERVICE_NAME: &str = "marketing-data-loader";

/// Health of a single database
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseHealth {
    Healthy,
    Unhealthy(String),
}

impl DatabaseHealth {
    pub fn is_healthy(&self) -> bool {
        matches!(self, DatabaseHealth::Healthy)
    }
}

impl std::fmt::Display for DatabaseHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseHealth::Healthy => f.write_str("healthy"),
            DatabaseHealth::Unhealthy(reason) => write!(f, "unhealthy: {reason}"),
        }
    }
}

impl Serialize for DatabaseHealth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Overall service status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Unhealthy,
}

/// Per-database health
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabasesHealth {
    /// Source (olist) database
    pub olist: DatabaseHealth,
    /// Warehouse (dwh) database
    pub dwh: DatabaseHealth,
}

/// Result of a health check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub service: String,
    pub status: ServiceStatus,
    pub databases: DatabasesHealth,
}

impl HealthReport {
    /// Builds a report; the service is healthy only if both databases are
    pub fn new(olist: DatabaseHealth, dwh: DatabaseHealth) -> Self {
        let status = if olist.is_healthy() && dwh.is_healthy() {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Unhealthy
        };

        Self {
            service: SERVICE_NAME.to_string(),
            status,
            databases: DatabasesHealth { olist, dwh },
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == ServiceStatus::Healthy
    }
}
