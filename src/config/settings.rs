//! Settings configuration types

use serde::Deserialize;
use std::time::Duration;

use crate::metrics::{DatadogClient, DEFAULT_DATADOG_SITE};
use crate::registry::{HubClient, DEFAULT_HUB_URL};
use crate::{Policy, Visibility};

/// Registry endpoint settings
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrySettings {
    /// Base URL of the Docker Hub API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_HUB_URL.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_read_timeout_secs() -> u64 {
    30
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
        }
    }
}

impl RegistrySettings {
    pub fn client(&self) -> HubClient {
        HubClient::with_timeouts(
            &self.base_url,
            Duration::from_secs(self.connect_timeout_secs),
            Duration::from_secs(self.read_timeout_secs),
        )
    }
}

/// Policy defaults from the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicySettings {
    /// Accounts required on every repository
    #[serde(default)]
    pub collaborators: Vec<String>,

    /// Visibility ceiling ("public" or "private")
    #[serde(default)]
    pub visibility: Option<Visibility>,
}

impl PolicySettings {
    /// Combine file defaults with command line values.
    ///
    /// Collaborators from both sources are unioned; a command line
    /// visibility wins over the file. Dry run and scope only come from the
    /// command line.
    pub fn resolve(
        &self,
        cli_collaborators: &[String],
        cli_visibility: Option<Visibility>,
        dry_run: bool,
        scope_repository: Option<String>,
    ) -> Policy {
        let collaborators = self
            .collaborators
            .iter()
            .chain(cli_collaborators)
            .flat_map(|entry| entry.split(','))
            .map(str::trim)
            .filter(|account| !account.is_empty());

        let mut policy = Policy::new()
            .with_collaborators(collaborators)
            .with_max_visibility(cli_visibility.or(self.visibility).unwrap_or_default())
            .with_dry_run(dry_run);

        if let Some(repository) = scope_repository.filter(|r| !r.trim().is_empty()) {
            policy = policy.scoped_to(repository);
        }

        policy
    }
}

/// Datadog submission settings
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    #[serde(default = "default_site")]
    pub site: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub app_key: Option<String>,
}

fn default_site() -> String {
    DEFAULT_DATADOG_SITE.to_string()
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            site: default_site(),
            api_key: None,
            app_key: None,
        }
    }
}

impl MetricsSettings {
    /// Build a Datadog client when both keys are known.
    ///
    /// Command line keys override the config file.
    pub fn client(
        &self,
        cli_api_key: Option<String>,
        cli_app_key: Option<String>,
    ) -> Option<DatadogClient> {
        let api_key = cli_api_key
            .or_else(|| self.api_key.clone())
            .filter(|k| !k.trim().is_empty())?;
        let app_key = cli_app_key
            .or_else(|| self.app_key.clone())
            .filter(|k| !k.trim().is_empty())?;
        Some(DatadogClient::with_site(&self.site, api_key, app_key))
    }
}
