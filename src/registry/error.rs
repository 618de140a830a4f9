//! Error types for registry operations

use thiserror::Error;

/// Errors that can occur while talking to the registry
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Credentials were rejected
    #[error("authentication failed for '{username}': {message}")]
    Authentication { username: String, message: String },

    /// A call that needs a session was made before `login`
    #[error("not logged in")]
    NotAuthenticated,

    /// The registry answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never got a response (DNS, TLS, connection reset, timeout)
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body did not have the expected shape
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The blocking request task panicked or was cancelled
    #[error("request task failed: {0}")]
    Task(String),
}

impl RegistryError {
    /// HTTP status of the failure, if the registry answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            RegistryError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ureq::Error> for RegistryError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, resp) => {
                let body = resp.into_string().unwrap_or_default();
                RegistryError::Http {
                    status,
                    message: describe_error_body(&body),
                }
            }
            ureq::Error::Transport(t) => RegistryError::Transport(t.to_string()),
        }
    }
}

/// Pull the human readable part out of a Docker Hub error body.
///
/// Docker Hub answers errors with `{"detail": ...}` or `{"message": ...}`;
/// anything else is passed through trimmed.
pub(crate) fn describe_error_body(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return "empty response body".to_string();
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };

    value
        .get("detail")
        .or_else(|| value.get("message"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| body.to_string())
}
