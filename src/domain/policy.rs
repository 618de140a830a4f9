use serde::Deserialize;
use std::collections::BTreeSet;

/// The most permissive visibility a repository may have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Default)]
pub enum Visibility {
    /// Public repositories are allowed
    #[default]
    #[serde(rename = "public")]
    Any,
    /// Every repository must be private
    #[serde(rename = "private")]
    PrivateOnly,
}

impl Visibility {
    /// Get the canonical string representation (as accepted on the command line)
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Any => "public",
            Visibility::PrivateOnly => "private",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "public" => Ok(Visibility::Any),
            "private" => Ok(Visibility::PrivateOnly),
            other => Err(format!(
                "invalid visibility '{}' (expected 'public' or 'private')",
                other
            )),
        }
    }
}

/// The rules enforced on every repository of an account.
///
/// Built once at startup and passed by reference to the scanner, the auditor
/// and the quota reporter. Nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Policy {
    /// Accounts that must have access to every repository
    pub required_collaborators: BTreeSet<String>,

    /// Visibility ceiling
    pub max_visibility: Visibility,

    /// Report violations without remediating them
    pub dry_run: bool,

    /// Audit only this repository instead of the full account listing
    pub scope_repository: Option<String>,
}

impl Policy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collaborators<I, S>(mut self, accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_collaborators
            .extend(accounts.into_iter().map(Into::into));
        self
    }

    pub fn with_max_visibility(mut self, visibility: Visibility) -> Self {
        self.max_visibility = visibility;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn scoped_to(mut self, repository: impl Into<String>) -> Self {
        self.scope_repository = Some(repository.into());
        self
    }

    /// Human readable description of what a run will do, one line per rule
    pub fn plan(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if !self.required_collaborators.is_empty() {
            let accounts = self
                .required_collaborators
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            if self.dry_run {
                lines.push(format!(
                    "Flag repositories that don't have [{}] as collaborators",
                    accounts
                ));
            } else {
                lines.push(format!(
                    "Ensure [{}] are collaborators on all repositories",
                    accounts
                ));
            }
        }

        if self.max_visibility == Visibility::PrivateOnly {
            lines.push("Flag repositories that are public".to_string());
        }

        if let Some(repo) = &self.scope_repository {
            lines.push(format!("Check only the repository '{}'", repo));
        }

        lines
    }
}
