//! Retry wrapper with linear backoff

use super::table_loader::TableLoader;
use crate::config::LoadConfig;
use crate::domain::{LoadResult, TableSpec};
use crate::log_retry_attempt;
use std::time::Duration;
use tokio::time::Instant;

/// How often, and how patiently, a table load is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: usize,
    base_delay: Duration,
}

impl RetryPolicy {
    /// At least one attempt is always made
    pub fn new(max_attempts: usize, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn from_config(config: &LoadConfig) -> Self {
        Self::new(config.retry_attempts, config.retry_delay())
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Sleep before attempt `attempt` (0-based): `base_delay * attempt`
    pub fn delay_for(&self, attempt: usize) -> Duration {
        let factor = u32::try_from(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

/// Loads `table`, retrying failed attempts according to `policy`
///
/// Returns the first successful result. When every attempt fails, the result
/// carries `failed after N attempts: <last error>` and the time spent across
/// all attempts. Never fails itself.
pub async fn load_with_retry(
    loader: &dyn TableLoader,
    table: &TableSpec,
    policy: &RetryPolicy,
) -> LoadResult {
    let start = Instant::now();
    let max_attempts = policy.max_attempts();
    let mut last_error = String::new();

    for attempt in 0..max_attempts {
        if attempt > 0 {
            log_retry_attempt!(table, attempt + 1, max_attempts, last_error);
            tokio::time::sleep(policy.delay_for(attempt)).await;
        }

        match loader.load(table).await {
            Ok(result) if result.is_success() => return result,
            Ok(result) => {
                last_error = result
                    .error_message()
                    .unwrap_or("unknown error")
                    .to_string();
            }
            Err(e) => last_error = e.to_string(),
        }
    }

    tracing::error!(
        table = %table,
        attempts = max_attempts,
        error = %last_error,
        "Table load failed after all retries"
    );

    LoadResult::error(
        table.clone(),
        format!("failed after {max_attempts} attempts: {last_error}"),
        start.elapsed(),
    )
}
