//! Audit command implementation

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use hubaudit::audit::{run_audit, Credentials, RunOutcome};
use hubaudit::config::Config;
use hubaudit::metrics::MetricsSink;
use hubaudit::registry::RegistryClient;
use hubaudit::Visibility;

/// Exit status of a `--strict` run that saw failures or violations
const STRICT_FAILURE_EXIT_CODE: i32 = 2;

/// Parsed command line values
pub struct AuditArgs {
    pub username: String,
    pub password: String,
    pub collaborators: Vec<String>,
    pub visibility: Option<Visibility>,
    pub repository: Option<String>,
    pub dry_run: bool,
    pub datadog_api_key: Option<String>,
    pub datadog_app_key: Option<String>,
    pub config: Option<PathBuf>,
    pub strict: bool,
}

/// Run the audit and return the process exit status.
///
/// A rejected login is returned as an error. Other failures only change
/// the exit status in strict mode.
pub async fn audit_command(args: AuditArgs) -> Result<i32> {
    let config = Config::load(args.config.as_deref())?;

    let policy = config.policy.resolve(
        &args.collaborators,
        args.visibility,
        args.dry_run,
        args.repository,
    );

    let client: Arc<dyn RegistryClient> = Arc::new(config.registry.client());
    let metrics = config
        .metrics
        .client(args.datadog_api_key, args.datadog_app_key)
        .map(|c| Arc::new(c) as Arc<dyn MetricsSink>);

    let credentials = Credentials::new(args.username, args.password);
    let outcome = run_audit(client, &credentials, &policy, metrics).await?;

    Ok(exit_code(&outcome, args.strict))
}

fn exit_code(outcome: &RunOutcome, strict: bool) -> i32 {
    if strict && (outcome.has_failures() || outcome.has_findings()) {
        STRICT_FAILURE_EXIT_CODE
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubaudit::audit::{RemediationTally, ScanSummary};
    use hubaudit::{AuditReport, Finding, QuotaStatus};

    fn clean_outcome() -> RunOutcome {
        let mut scan = ScanSummary::default();
        scan.reports.push(AuditReport::new("acme/api"));
        RunOutcome {
            scan,
            remediations: RemediationTally::default(),
            quota: Some(QuotaStatus::new(1, 10)),
            quota_checked: true,
        }
    }

    #[test]
    fn test_strict_with_findings_fails() {
        let mut outcome = clean_outcome();
        outcome.scan.reports[0].findings.push(Finding::PublicRepository);
        assert_eq!(exit_code(&outcome, true), STRICT_FAILURE_EXIT_CODE);
    }

    #[test]
    fn test_strict_with_failed_remediation_fails() {
        let mut outcome = clean_outcome();
        outcome.remediations.failed = 1;
        assert_eq!(exit_code(&outcome, true), STRICT_FAILURE_EXIT_CODE);
    }

    #[test]
    fn test_strict_with_missing_quota_fails() {
        let mut outcome = clean_outcome();
        outcome.quota = None;
        assert_eq!(exit_code(&outcome, true), STRICT_FAILURE_EXIT_CODE);
    }

    #[test]
    fn test_strict_clean_run_succeeds() {
        assert_eq!(exit_code(&clean_outcome(), true), 0);
    }

    #[test]
    fn test_non_strict_ignores_failures() {
        let mut outcome = clean_outcome();
        outcome.scan.listing_failed = true;
        outcome.remediations.failed = 2;
        outcome.scan.reports[0].findings.push(Finding::PublicRepository);
        assert_eq!(exit_code(&outcome, false), 0);
    }
}
