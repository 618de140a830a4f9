//! Container registry access.
//!
//! [`RegistryClient`] is the seam the auditor works against; [`HubClient`]
//! implements it over the Docker Hub v2 HTTP API.

mod error;
mod hub;

pub use error::RegistryError;
pub use hub::{HubClient, DEFAULT_HUB_URL};

use async_trait::async_trait;
use serde::Deserialize;

/// Entry of an account's repository listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

/// Repository metadata
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryInfo {
    pub namespace: String,
    pub name: String,
    pub is_private: bool,
}

/// An account granted access to a repository
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Collaborator {
    pub user: String,
}

/// Account-wide private repository allowance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RegistryQuota {
    pub private_repo_used: u64,
    pub private_repo_limit: u64,
}

/// Operations the audit needs from a registry
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Authenticate; every later call acts on behalf of this user
    async fn login(&self, username: &str, password: &str) -> Result<(), RegistryError>;

    /// List all repositories owned by `username`
    async fn list_repositories(
        &self,
        username: &str,
    ) -> Result<Vec<RepositorySummary>, RegistryError>;

    async fn get_repository(
        &self,
        username: &str,
        name: &str,
    ) -> Result<RepositoryInfo, RegistryError>;

    async fn list_collaborators(
        &self,
        username: &str,
        name: &str,
    ) -> Result<Vec<Collaborator>, RegistryError>;

    /// Grant `account` access to `username/name`
    async fn add_collaborator(
        &self,
        username: &str,
        name: &str,
        account: &str,
    ) -> Result<(), RegistryError>;

    async fn get_quota(&self, username: &str) -> Result<RegistryQuota, RegistryError>;
}
