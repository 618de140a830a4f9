//! One full audit invocation

use anyhow::{Context, Result};
use std::sync::Arc;

use super::quota::report_quota;
use super::remediation::RemediationTally;
use super::scanner::{scan, ScanSummary};
use crate::metrics::MetricsSink;
use crate::registry::RegistryClient;
use crate::{Policy, QuotaStatus};

/// Account credentials
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything a finished run observed
#[derive(Debug)]
pub struct RunOutcome {
    pub scan: ScanSummary,
    pub remediations: RemediationTally,
    /// `None` when the quota was not checked or could not be fetched
    pub quota: Option<QuotaStatus>,
    pub quota_checked: bool,
}

impl RunOutcome {
    /// Whether any unit of work failed
    pub fn has_failures(&self) -> bool {
        self.scan.has_failures()
            || self.remediations.failed > 0
            || (self.quota_checked && self.quota.is_none())
    }

    pub fn has_findings(&self) -> bool {
        self.scan.finding_count() > 0
    }
}

/// Log in, scan the account, report the quota and let dispatched
/// remediations finish.
///
/// Only a rejected login is an error; every other failure is logged at the
/// boundary of its own unit of work and surfaces in the returned outcome.
/// The quota is only checked when the whole account is scanned.
pub async fn run_audit(
    client: Arc<dyn RegistryClient>,
    credentials: &Credentials,
    policy: &Policy,
    metrics: Option<Arc<dyn MetricsSink>>,
) -> Result<RunOutcome> {
    let plan = policy.plan();
    if !plan.is_empty() {
        tracing::info!("The application will:");
        for line in &plan {
            tracing::info!("  - {}", line);
        }
    }

    tracing::debug!("Logging into the registry as '{}'", credentials.username);
    client
        .login(&credentials.username, &credentials.password)
        .await
        .context("Error during login")?;

    let mut summary = scan(client.clone(), &credentials.username, policy).await;

    let quota_checked = policy.scope_repository.is_none();
    let quota = if quota_checked {
        report_quota(client.as_ref(), &credentials.username, metrics.as_deref()).await
    } else {
        None
    };

    let pending = std::mem::take(&mut summary.remediations);
    let remediations = pending.settle().await;

    tracing::info!(
        "Audited {} repositories ({} compliant): {} findings, {} failed, {} collaborators added, {} additions failed",
        summary.audited(),
        summary.compliant(),
        summary.finding_count(),
        summary.failed.len(),
        remediations.succeeded,
        remediations.failed
    );

    Ok(RunOutcome {
        scan: summary,
        remediations,
        quota,
        quota_checked,
    })
}
