//! Dependency initialization and wiring for the document gateway.

use std::sync::Arc;
use tracing::info;

use crate::config::Settings;
use crate::GatewayInitError;
use document_gateway_repository::{DocumentGateway, DocumentStore, OpenSearchStore};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The settings the dependencies were built from.
    pub settings: Settings,
    /// The gateway, ready to serve requests.
    pub gateway: DocumentGateway,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// See [`Settings::from_env`] for the variables read.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(GatewayInitError)` - If configuration is invalid or the store is unreachable
    pub async fn new() -> Result<Self, GatewayInitError> {
        let settings = Settings::from_env()?;
        Self::from_settings(settings).await
    }

    /// Initialize dependencies from explicit settings.
    pub async fn from_settings(settings: Settings) -> Result<Self, GatewayInitError> {
        info!(
            opensearch_url = %settings.opensearch.url,
            "Initializing dependencies"
        );

        let store = OpenSearchStore::new(&settings.opensearch).map_err(|e| {
            GatewayInitError::config(format!("Failed to create OpenSearch store: {}", e))
        })?;

        Self::with_store(settings, Arc::new(store)).await
    }

    /// Initialize dependencies around an already-built store.
    ///
    /// The store must report healthy before the gateway is handed out.
    pub async fn with_store(
        settings: Settings,
        store: Arc<dyn DocumentStore>,
    ) -> Result<Self, GatewayInitError> {
        let healthy = store
            .health_check()
            .await
            .map_err(|e| GatewayInitError::config(format!("Store health check failed: {}", e)))?;

        if !healthy {
            return Err(GatewayInitError::config("Store cluster is unhealthy"));
        }

        info!("Store connection verified");

        Ok(Self {
            settings,
            gateway: DocumentGateway::new(store),
        })
    }
}
