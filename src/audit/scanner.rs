//! Account-wide repository scan

use futures::future::join_all;
use std::sync::Arc;

use super::auditor::audit_repository;
use super::remediation::PendingRemediations;
use crate::registry::RegistryClient;
use crate::{AuditReport, Policy};

/// Aggregate of one scan
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Reports of the repositories that were fully audited
    pub reports: Vec<AuditReport>,
    /// Repositories whose audit was abandoned
    pub failed: Vec<String>,
    /// The repository listing itself could not be fetched
    pub listing_failed: bool,
    pub remediations: PendingRemediations,
}

impl ScanSummary {
    pub fn audited(&self) -> usize {
        self.reports.len()
    }

    /// Audited repositories without any finding
    pub fn compliant(&self) -> usize {
        self.reports.iter().filter(|r| r.is_compliant()).count()
    }

    pub fn finding_count(&self) -> usize {
        self.reports.iter().map(|r| r.findings.len()).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.listing_failed || !self.failed.is_empty()
    }

    pub fn report(&self, repository: &str) -> Option<&AuditReport> {
        self.reports.iter().find(|r| r.repository == repository)
    }
}

/// Audit the repositories of `username` selected by `policy`.
///
/// With a scoped policy only that repository is audited and the account is
/// never listed. Every repository is its own failure boundary: a failed
/// audit is logged and the others carry on. Audits run concurrently.
pub async fn scan(client: Arc<dyn RegistryClient>, username: &str, policy: &Policy) -> ScanSummary {
    let mut summary = ScanSummary::default();

    let names = match &policy.scope_repository {
        Some(repository) => vec![repository.clone()],
        None => match client.list_repositories(username).await {
            Ok(repos) => repos.into_iter().map(|r| r.name).collect(),
            Err(e) => {
                tracing::error!("Error when fetching all repositories: {}", e);
                summary.listing_failed = true;
                return summary;
            }
        },
    };

    tracing::debug!("Auditing {} repositories of {}", names.len(), username);

    let audits = names
        .iter()
        .map(|name| audit_repository(&client, username, name, policy));
    let results = join_all(audits).await;

    for (name, result) in names.iter().zip(results) {
        match result {
            Ok(outcome) => {
                summary.remediations.absorb(outcome.remediations);
                summary.reports.push(outcome.report);
            }
            Err(e) => {
                tracing::error!("Unable to get details of repository {}/{}: {}", username, name, e);
                summary.failed.push(format!("{}/{}", username, name));
            }
        }
    }

    summary
}
