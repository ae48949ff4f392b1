//! Settings read from the environment.

use std::env;
use std::time::Duration;

use crate::GatewayInitError;
use document_gateway_repository::config::DEFAULT_OPENSEARCH_URL;
use document_gateway_repository::OpenSearchConfig;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Gateway settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Store connection settings.
    pub opensearch: OpenSearchConfig,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Settings {
    /// Read settings from environment variables, loading `.env` first if present.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `OPENSEARCH_USERNAME` / `OPENSEARCH_PASSWORD`: basic auth credentials
    /// - `OPENSEARCH_TIMEOUT_SECS`: transport request timeout in seconds
    /// - `LOG_FORMAT`: `pretty` (default) or `json`
    pub fn from_env() -> Result<Self, GatewayInitError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which returns the value of a variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayInitError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("OPENSEARCH_URL").unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string());

        let timeout = match lookup("OPENSEARCH_TIMEOUT_SECS") {
            Some(value) => Some(Duration::from_secs(value.trim().parse().map_err(|_| {
                GatewayInitError::config(format!("Invalid OPENSEARCH_TIMEOUT_SECS: {}", value))
            })?)),
            None => None,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(GatewayInitError::config(format!(
                    "Invalid LOG_FORMAT: {}",
                    other
                )))
            }
        };

        Ok(Self {
            opensearch: OpenSearchConfig {
                url,
                username: lookup("OPENSEARCH_USERNAME"),
                password: lookup("OPENSEARCH_PASSWORD"),
                timeout,
            },
            log_format,
        })
    }
}
