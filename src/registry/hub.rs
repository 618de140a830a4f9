//! Docker Hub v2 API client.
//!
//! `ureq` is blocking, so every trait method moves its request onto the
//! blocking pool with `spawn_blocking`.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use super::{
    Collaborator, RegistryClient, RegistryError, RegistryQuota, RepositoryInfo, RepositorySummary,
};

/// Default Docker Hub URL
pub const DEFAULT_HUB_URL: &str = "https://hub.docker.com";

/// Page size requested for paginated listings (Docker Hub caps it at 100)
const PAGE_SIZE: u32 = 100;

const USER_AGENT: &str = concat!("hubaudit/", env!("CARGO_PKG_VERSION"));

fn encode_url_path_segment(segment: &str) -> String {
    // RFC3986 unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
    let mut out = String::with_capacity(segment.len());
    for &b in segment.as_bytes() {
        let is_unreserved =
            matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~');
        if is_unreserved {
            out.push(b as char);
        } else {
            out.push('%');
            out.push_str(&format!("{:02X}", b));
        }
    }
    out
}

/// One page of a paginated Docker Hub listing
#[derive(Deserialize)]
struct Page<T> {
    #[serde(default)]
    next: Option<String>,
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

/// Docker Hub client
#[derive(Clone)]
pub struct HubClient {
    base_url: String,
    agent: ureq::Agent,
    /// JWT handed out by the login endpoint
    token: Arc<RwLock<Option<String>>>,
}

impl HubClient {
    /// Create a client for the public Docker Hub
    pub fn new() -> Self {
        Self::with_url(DEFAULT_HUB_URL)
    }

    /// Create a client for a custom base URL
    pub fn with_url(base_url: impl Into<String>) -> Self {
        Self::with_timeouts(base_url, Duration::from_secs(5), Duration::from_secs(30))
    }

    pub fn with_timeouts(
        base_url: impl Into<String>,
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(connect_timeout)
            .timeout_read(read_timeout)
            .user_agent(USER_AGENT)
            .build();

        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn login_url(&self) -> String {
        format!("{}/v2/users/login/", self.base_url)
    }

    fn repositories_url(&self, username: &str) -> String {
        format!(
            "{}/v2/repositories/{}/?page_size={}",
            self.base_url,
            encode_url_path_segment(username),
            PAGE_SIZE
        )
    }

    fn repository_url(&self, username: &str, name: &str) -> String {
        format!(
            "{}/v2/repositories/{}/{}/",
            self.base_url,
            encode_url_path_segment(username),
            encode_url_path_segment(name)
        )
    }

    fn collaborators_url(&self, username: &str, name: &str) -> String {
        format!("{}collaborators/", self.repository_url(username, name))
    }

    fn registry_settings_url(&self, username: &str) -> String {
        format!(
            "{}/v2/users/{}/registry-settings/",
            self.base_url,
            encode_url_path_segment(username)
        )
    }

    fn authorized(&self, req: ureq::Request) -> Result<ureq::Request, RegistryError> {
        let guard = self
            .token
            .read()
            .map_err(|_| RegistryError::Task("token lock poisoned".to_string()))?;
        match guard.as_deref() {
            Some(token) => Ok(req.set("Authorization", &format!("JWT {}", token))),
            None => Err(RegistryError::NotAuthenticated),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RegistryError> {
        let response = self.authorized(self.agent.get(url))?.call()?;
        response
            .into_json()
            .map_err(|e| RegistryError::Decode(e.to_string()))
    }

    /// Follow `next` links until the listing is exhausted
    fn get_all_pages<T: DeserializeOwned>(&self, first: String) -> Result<Vec<T>, RegistryError> {
        let mut items = Vec::new();
        let mut next = Some(first);
        while let Some(url) = next.take() {
            let page: Page<T> = self.get_json(&url)?;
            items.extend(page.results);
            next = page.next.filter(|n| !n.is_empty() && *n != url);
        }
        Ok(items)
    }

    fn login_blocking(&self, username: &str, password: &str) -> Result<(), RegistryError> {
        #[derive(Deserialize)]
        struct LoginResponse {
            token: String,
        }

        let result = self.agent.post(&self.login_url()).send_json(serde_json::json!({
            "username": username,
            "password": password,
        }));

        let response = match result {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code @ (400 | 401 | 403), resp)) => {
                let body = resp.into_string().unwrap_or_default();
                tracing::debug!("Login rejected with HTTP {}", code);
                return Err(RegistryError::Authentication {
                    username: username.to_string(),
                    message: super::error::describe_error_body(&body),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let body: LoginResponse = response
            .into_json()
            .map_err(|e| RegistryError::Decode(e.to_string()))?;

        let mut guard = self
            .token
            .write()
            .map_err(|_| RegistryError::Task("token lock poisoned".to_string()))?;
        *guard = Some(body.token);
        Ok(())
    }

    fn add_collaborator_blocking(
        &self,
        username: &str,
        name: &str,
        account: &str,
    ) -> Result<(), RegistryError> {
        let url = self.collaborators_url(username, name);
        self.authorized(self.agent.post(&url))?
            .send_json(serde_json::json!({ "user": account }))?;
        Ok(())
    }
}

impl Default for HubClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a blocking request on the blocking pool
async fn blocking<T, F>(f: F) -> Result<T, RegistryError>
where
    F: FnOnce() -> Result<T, RegistryError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| RegistryError::Task(e.to_string()))?
}

#[async_trait]
impl RegistryClient for HubClient {
    async fn login(&self, username: &str, password: &str) -> Result<(), RegistryError> {
        let client = self.clone();
        let username = username.to_string();
        let password = password.to_string();
        blocking(move || client.login_blocking(&username, &password)).await
    }

    async fn list_repositories(
        &self,
        username: &str,
    ) -> Result<Vec<RepositorySummary>, RegistryError> {
        let client = self.clone();
        let url = self.repositories_url(username);
        blocking(move || client.get_all_pages(url)).await
    }

    async fn get_repository(
        &self,
        username: &str,
        name: &str,
    ) -> Result<RepositoryInfo, RegistryError> {
        let client = self.clone();
        let url = self.repository_url(username, name);
        blocking(move || client.get_json(&url)).await
    }

    async fn list_collaborators(
        &self,
        username: &str,
        name: &str,
    ) -> Result<Vec<Collaborator>, RegistryError> {
        let client = self.clone();
        let url = self.collaborators_url(username, name);
        blocking(move || client.get_all_pages(url)).await
    }

    async fn add_collaborator(
        &self,
        username: &str,
        name: &str,
        account: &str,
    ) -> Result<(), RegistryError> {
        let client = self.clone();
        let (username, name, account) = (username.to_string(), name.to_string(), account.to_string());
        blocking(move || client.add_collaborator_blocking(&username, &name, &account)).await
    }

    async fn get_quota(&self, username: &str) -> Result<RegistryQuota, RegistryError> {
        let client = self.clone();
        let url = self.registry_settings_url(username);
        blocking(move || client.get_json(&url)).await
    }
}
