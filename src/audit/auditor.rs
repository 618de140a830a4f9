//! Per-repository policy evaluation

use std::sync::Arc;

use super::remediation::{self, PendingRemediations};
use crate::registry::{RegistryClient, RegistryError};
use crate::{AuditReport, Finding, Policy, RepositorySnapshot, Visibility};

/// What the policy says about one snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// Violations to report
    pub findings: Vec<Finding>,
    /// Missing accounts the run is allowed to add
    pub to_add: Vec<String>,
}

/// Apply `policy` to `snapshot`.
///
/// The visibility rule is report-only. A missing collaborator becomes a
/// finding in dry-run mode and a remediation otherwise, never both.
pub fn evaluate(snapshot: &RepositorySnapshot, policy: &Policy) -> Evaluation {
    let mut evaluation = Evaluation::default();

    if policy.max_visibility == Visibility::PrivateOnly && !snapshot.is_private {
        evaluation.findings.push(Finding::PublicRepository);
    }

    for account in &policy.required_collaborators {
        if snapshot.has_collaborator(account) {
            continue;
        }
        if policy.dry_run {
            evaluation
                .findings
                .push(Finding::MissingCollaborator(account.clone()));
        } else {
            evaluation.to_add.push(account.clone());
        }
    }

    evaluation
}

/// Report plus the remediations it dispatched
#[derive(Debug)]
pub struct AuditOutcome {
    pub report: AuditReport,
    pub remediations: PendingRemediations,
}

/// Fetch `owner/name`, evaluate it and dispatch remediations.
///
/// Metadata and collaborators are fetched concurrently; evaluation waits for
/// both. If either fetch fails the audit is abandoned and nothing is
/// reported or changed.
pub async fn audit_repository(
    client: &Arc<dyn RegistryClient>,
    owner: &str,
    name: &str,
    policy: &Policy,
) -> Result<AuditOutcome, RegistryError> {
    let (info, collaborators) = futures::join!(
        client.get_repository(owner, name),
        client.list_collaborators(owner, name)
    );
    let info = info?;
    let collaborators = collaborators?;

    let snapshot = RepositorySnapshot::new(info.namespace, info.name, info.is_private)
        .with_collaborators(collaborators.into_iter().map(|c| c.user));
    let full_name = snapshot.full_name();
    tracing::debug!(
        "Auditing {} (private: {}, collaborators: {})",
        full_name,
        snapshot.is_private,
        snapshot.collaborators.len()
    );

    let evaluation = evaluate(&snapshot, policy);

    for finding in &evaluation.findings {
        tracing::warn!("Repository {} {}", full_name, finding);
    }

    let mut remediations = PendingRemediations::new();
    for account in &evaluation.to_add {
        tracing::info!("Adding {} as a collaborator on {}", account, full_name);
        remediations.push(remediation::dispatch(client.clone(), owner, name, account));
    }

    let mut report = AuditReport::new(full_name);
    report.findings = evaluation.findings;
    report.remediated = evaluation.to_add;

    Ok(AuditOutcome {
        report,
        remediations,
    })
}
