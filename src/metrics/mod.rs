//! Optional metrics submission.

mod datadog;

pub use datadog::{DatadogClient, DEFAULT_DATADOG_SITE};

use async_trait::async_trait;
use thiserror::Error;

/// Gauge reporting the share of the private repository quota in use
pub const PRIVATE_REPOS_USED_PCT: &str = "registry.private_repos_used_pct";

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("metrics endpoint returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("metrics transport error: {0}")]
    Transport(String),

    #[error("metrics task failed: {0}")]
    Task(String),
}

/// Destination for run metrics
#[async_trait]
pub trait MetricsSink: Send + Sync {
    /// Submit a single gauge point stamped with the current time
    async fn gauge(&self, name: &str, value: f64, tags: &[String]) -> Result<(), MetricsError>;
}
