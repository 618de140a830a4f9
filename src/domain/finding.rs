use serde::Serialize;

/// A single policy violation found on a repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "account", rename_all = "snake_case")]
pub enum Finding {
    /// The repository is public while the policy only allows private ones
    PublicRepository,
    /// A required account has no access and the run is not allowed to fix it
    MissingCollaborator(String),
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Finding::PublicRepository => write!(f, "is public"),
            Finding::MissingCollaborator(account) => {
                write!(f, "does not have {} as a collaborator", account)
            }
        }
    }
}

/// Result of auditing one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditReport {
    /// `namespace/name`
    pub repository: String,
    pub findings: Vec<Finding>,
    /// Accounts for which an add-collaborator call was dispatched
    pub remediated: Vec<String>,
}

impl AuditReport {
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            findings: Vec::new(),
            remediated: Vec::new(),
        }
    }

    pub fn is_compliant(&self) -> bool {
        self.findings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_messages() {
        assert_eq!(Finding::PublicRepository.to_string(), "is public");
        assert_eq!(
            Finding::MissingCollaborator("alice".into()).to_string(),
            "does not have alice as a collaborator"
        );
    }

    #[test]
    fn test_report_compliance() {
        let mut report = AuditReport::new("acme/api");
        report.remediated.push("alice".into());
        assert!(report.is_compliant());

        report.findings.push(Finding::PublicRepository);
        assert!(!report.is_compliant());
    }

    #[test]
    fn test_finding_serializes_with_kind() {
        let json = serde_json::to_value(Finding::MissingCollaborator("bob".into())).unwrap();
        assert_eq!(json["kind"], "missing_collaborator");
        assert_eq!(json["account"], "bob");
    }
}
