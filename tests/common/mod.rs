//! Shared test utilities: an in-memory registry and a recording metrics sink

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::{Arc, Mutex};

use hubaudit::metrics::{MetricsError, MetricsSink};
use hubaudit::registry::{
    Collaborator, RegistryClient, RegistryError, RegistryQuota, RepositoryInfo, RepositorySummary,
};

/// A registry call observed by [`FakeRegistry`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Login(String),
    ListRepositories(String),
    GetRepository(String),
    ListCollaborators(String),
    AddCollaborator(String, String),
    GetQuota(String),
}

#[derive(Default)]
struct FakeRepo {
    is_private: bool,
    collaborators: BTreeSet<String>,
}

#[derive(Default)]
struct State {
    repos: BTreeMap<String, FakeRepo>,
    password: String,
    quota: Option<RegistryQuota>,
    fail_listing: bool,
    fail_metadata: HashSet<String>,
    fail_collaborators: HashSet<String>,
    fail_add: HashSet<String>,
    calls: Vec<Call>,
}

/// In-memory registry for a single account
#[derive(Clone, Default)]
pub struct FakeRegistry {
    state: Arc<Mutex<State>>,
}

fn server_error(what: &str) -> RegistryError {
    RegistryError::Http {
        status: 500,
        message: format!("{} unavailable", what),
    }
}

impl FakeRegistry {
    pub fn new(password: &str) -> Self {
        let registry = Self::default();
        registry.state.lock().unwrap().password = password.to_string();
        registry
    }

    pub fn with_repo(self, name: &str, is_private: bool, collaborators: &[&str]) -> Self {
        self.state.lock().unwrap().repos.insert(
            name.to_string(),
            FakeRepo {
                is_private,
                collaborators: collaborators.iter().map(|c| c.to_string()).collect(),
            },
        );
        self
    }

    pub fn with_quota(self, used: u64, limit: u64) -> Self {
        self.state.lock().unwrap().quota = Some(RegistryQuota {
            private_repo_used: used,
            private_repo_limit: limit,
        });
        self
    }

    pub fn failing_listing(self) -> Self {
        self.state.lock().unwrap().fail_listing = true;
        self
    }

    pub fn failing_metadata(self, name: &str) -> Self {
        self.state.lock().unwrap().fail_metadata.insert(name.to_string());
        self
    }

    pub fn failing_collaborators(self, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .fail_collaborators
            .insert(name.to_string());
        self
    }

    pub fn failing_add(self, account: &str) -> Self {
        self.state.lock().unwrap().fail_add.insert(account.to_string());
        self
    }

    pub fn client(&self) -> Arc<dyn RegistryClient> {
        Arc::new(self.clone())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// `(repository, account)` pairs of every add-collaborator call
    pub fn add_calls(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::AddCollaborator(repo, account) => Some((repo, account)),
                _ => None,
            })
            .collect()
    }

    pub fn collaborators_of(&self, name: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .repos
            .get(name)
            .map(|r| r.collaborators.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl RegistryClient for FakeRegistry {
    async fn login(&self, username: &str, password: &str) -> Result<(), RegistryError> {
        self.record(Call::Login(username.to_string()));
        if self.state.lock().unwrap().password == password {
            Ok(())
        } else {
            Err(RegistryError::Authentication {
                username: username.to_string(),
                message: "Incorrect authentication credentials.".to_string(),
            })
        }
    }

    async fn list_repositories(
        &self,
        username: &str,
    ) -> Result<Vec<RepositorySummary>, RegistryError> {
        self.record(Call::ListRepositories(username.to_string()));
        let state = self.state.lock().unwrap();
        if state.fail_listing {
            return Err(server_error("listing"));
        }
        Ok(state
            .repos
            .keys()
            .map(|name| RepositorySummary {
                name: name.clone(),
                namespace: username.to_string(),
            })
            .collect())
    }

    async fn get_repository(
        &self,
        username: &str,
        name: &str,
    ) -> Result<RepositoryInfo, RegistryError> {
        self.record(Call::GetRepository(name.to_string()));
        let state = self.state.lock().unwrap();
        if state.fail_metadata.contains(name) {
            return Err(server_error("metadata"));
        }
        let repo = state.repos.get(name).ok_or_else(|| RegistryError::Http {
            status: 404,
            message: "object not found".to_string(),
        })?;
        Ok(RepositoryInfo {
            namespace: username.to_string(),
            name: name.to_string(),
            is_private: repo.is_private,
        })
    }

    async fn list_collaborators(
        &self,
        _username: &str,
        name: &str,
    ) -> Result<Vec<Collaborator>, RegistryError> {
        self.record(Call::ListCollaborators(name.to_string()));
        let state = self.state.lock().unwrap();
        if state.fail_collaborators.contains(name) {
            return Err(server_error("collaborators"));
        }
        let repo = state.repos.get(name).ok_or_else(|| RegistryError::Http {
            status: 404,
            message: "object not found".to_string(),
        })?;
        Ok(repo
            .collaborators
            .iter()
            .map(|user| Collaborator { user: user.clone() })
            .collect())
    }

    async fn add_collaborator(
        &self,
        _username: &str,
        name: &str,
        account: &str,
    ) -> Result<(), RegistryError> {
        self.record(Call::AddCollaborator(name.to_string(), account.to_string()));
        let mut state = self.state.lock().unwrap();
        if state.fail_add.contains(account) {
            return Err(RegistryError::Http {
                status: 400,
                message: format!("{} does not exist", account),
            });
        }
        if let Some(repo) = state.repos.get_mut(name) {
            repo.collaborators.insert(account.to_string());
        }
        Ok(())
    }

    async fn get_quota(&self, username: &str) -> Result<RegistryQuota, RegistryError> {
        self.record(Call::GetQuota(username.to_string()));
        self.state
            .lock()
            .unwrap()
            .quota
            .ok_or_else(|| server_error("registry settings"))
    }
}

/// Metrics sink that records every gauge it receives
#[derive(Clone, Default)]
pub struct RecordingMetrics {
    points: Arc<Mutex<Vec<(String, f64, Vec<String>)>>>,
    fail: bool,
}

impl RecordingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn points(&self) -> Vec<(String, f64, Vec<String>)> {
        self.points.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetricsSink for RecordingMetrics {
    async fn gauge(&self, name: &str, value: f64, tags: &[String]) -> Result<(), MetricsError> {
        self.points
            .lock()
            .unwrap()
            .push((name.to_string(), value, tags.to_vec()));
        if self.fail {
            return Err(MetricsError::Http {
                status: 403,
                body: "Forbidden".to_string(),
            });
        }
        Ok(())
    }
}
