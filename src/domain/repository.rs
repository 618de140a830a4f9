use std::collections::BTreeSet;

/// Point-in-time view of one repository, assembled from two separate
/// registry reads (metadata and collaborators).
///
/// The reads are not transactional: if the repository changes between them
/// the snapshot can mix old and new facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySnapshot {
    pub namespace: String,
    pub name: String,
    pub is_private: bool,
    /// Accounts currently granted access
    pub collaborators: BTreeSet<String>,
}

impl RepositorySnapshot {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, is_private: bool) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            is_private,
            collaborators: BTreeSet::new(),
        }
    }

    pub fn with_collaborators<I, S>(mut self, accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collaborators.extend(accounts.into_iter().map(Into::into));
        self
    }

    /// `namespace/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }

    pub fn has_collaborator(&self, account: &str) -> bool {
        self.collaborators.contains(account)
    }
}
