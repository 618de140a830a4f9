//! Private repository quota report

use crate::metrics::{MetricsSink, PRIVATE_REPOS_USED_PCT};
use crate::registry::RegistryClient;
use crate::QuotaStatus;

/// Fetch and classify the private repository quota of `username`.
///
/// Logs at warn when usage is over the threshold and at info otherwise,
/// then forwards the percentage to `metrics` if one is configured. A fetch
/// failure is logged and yields `None`; a metrics failure is logged and
/// does not change the result.
pub async fn report_quota(
    client: &dyn RegistryClient,
    username: &str,
    metrics: Option<&dyn MetricsSink>,
) -> Option<QuotaStatus> {
    let quota = match client.get_quota(username).await {
        Ok(quota) => quota,
        Err(e) => {
            tracing::error!("Error when fetching registry settings: {}", e);
            return None;
        }
    };

    let status = QuotaStatus::new(quota.private_repo_used, quota.private_repo_limit);
    if status.over_threshold {
        tracing::warn!("{}", status);
    } else {
        tracing::info!("{}", status);
    }

    if let Some(sink) = metrics {
        let tags = vec![format!("account:{}", username)];
        if let Err(e) = sink.gauge(PRIVATE_REPOS_USED_PCT, status.used_pct, &tags).await {
            tracing::error!("Unable to submit {} metric: {}", PRIVATE_REPOS_USED_PCT, e);
        }
    }

    Some(status)
}
