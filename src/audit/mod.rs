//! Compliance audit of a registry account.
//!
//! The [`scanner`] enumerates repositories and hands each one to the
//! [`auditor`], which applies the [`Policy`](crate::Policy) and dispatches
//! collaborator remediations. The [`quota`] reporter runs once per account.
//! [`run_audit`] wires the pieces together for a whole invocation.

pub mod auditor;
pub mod quota;
pub mod remediation;
pub mod run;
pub mod scanner;

pub use auditor::{audit_repository, evaluate, AuditOutcome, Evaluation};
pub use quota::report_quota;
pub use remediation::{PendingRemediations, RemediationTally};
pub use run::{run_audit, Credentials, RunOutcome};
pub use scanner::{scan, ScanSummary};
