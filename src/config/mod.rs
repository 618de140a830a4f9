//! Configuration loading and management

mod settings;

pub use settings::{MetricsSettings, PolicySettings, RegistrySettings};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Registry endpoint settings
    #[serde(default)]
    pub registry: RegistrySettings,

    /// Policy defaults, merged with command line flags
    #[serde(default)]
    pub policy: PolicySettings,

    /// Metrics submission settings
    #[serde(default)]
    pub metrics: MetricsSettings,
}

impl Config {
    /// Get the global config directory path (~/.hubaudit/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".hubaudit")
    }

    /// Get the global config file path (~/.hubaudit/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load the configuration for a run.
    ///
    /// An explicit path must exist. Without one the global config is used
    /// when present, and built-in defaults otherwise.
    pub fn load(path_override: Option<&Path>) -> Result<Self> {
        if let Some(path) = path_override {
            return Self::from_file(path);
        }

        let global_path = Self::global_config_path();
        if global_path.exists() {
            tracing::debug!("Using config file {}", global_path.display());
            return Self::from_file(&global_path);
        }

        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.registry.base_url, crate::registry::DEFAULT_HUB_URL);
        assert!(config.policy.collaborators.is_empty());
        assert!(config.policy.visibility.is_none());
        assert!(config.metrics.api_key.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            [registry]
            base_url = "https://hub.internal.test"
            read_timeout_secs = 60

            [policy]
            collaborators = ["alice", "ci-bot"]
            visibility = "private"

            [metrics]
            site = "datadoghq.eu"
            api_key = "api"
            app_key = "app"
            "#,
        )
        .unwrap();

        assert_eq!(config.registry.base_url, "https://hub.internal.test");
        assert_eq!(config.registry.connect_timeout_secs, 5);
        assert_eq!(config.registry.read_timeout_secs, 60);
        assert_eq!(config.policy.collaborators, vec!["alice", "ci-bot"]);
        assert_eq!(
            config.policy.visibility,
            Some(crate::Visibility::PrivateOnly)
        );
        assert_eq!(config.metrics.site, "datadoghq.eu");
    }

    #[test]
    fn test_unknown_visibility_rejected() {
        let result: Result<Config, _> = toml::from_str(
            r#"
            [policy]
            visibility = "internal"
            "#,
        );
        assert!(result.is_err());
    }
}
