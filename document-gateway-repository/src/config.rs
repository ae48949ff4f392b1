//! Configuration types for the OpenSearch store.

use std::time::Duration;

/// Default OpenSearch URL.
pub const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Connection settings for `OpenSearchStore`.
#[derive(Debug, Clone)]
pub struct OpenSearchConfig {
    /// The OpenSearch server URL (e.g., "http://localhost:9200").
    pub url: String,
    /// Basic auth user. Credentials are sent only when a password is also set.
    pub username: Option<String>,
    /// Basic auth password.
    pub password: Option<String>,
    /// Transport request timeout. None leaves the client default.
    pub timeout: Option<Duration>,
}

impl Default for OpenSearchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_OPENSEARCH_URL.to_string(),
            username: None,
            password: None,
            timeout: None,
        }
    }
}

impl OpenSearchConfig {
    /// Create a config for the given URL with no auth and no timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set basic auth credentials.
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the transport request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Basic auth credentials, when both parts are set.
    pub fn basic_auth(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username.as_str(), password.as_str())),
            _ => None,
        }
    }
}
