//! # Document Gateway
//!
//! Wiring for the document gateway: reads configuration from the
//! environment, sets up tracing, builds the OpenSearch store, and hands out
//! a ready [`DocumentGateway`].

pub mod config;
pub mod telemetry;

pub use config::{Dependencies, LogFormat, Settings};
pub use document_gateway_repository::DocumentGateway;
pub use document_gateway_shared::{BulkDocumentRequest, DocumentRequest};

use thiserror::Error;

/// Errors that can occur while initializing the gateway.
#[derive(Error, Debug)]
pub enum GatewayInitError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Store error.
    #[error("Store error: {0}")]
    StoreError(#[from] document_gateway_repository::StoreError),
}

impl GatewayInitError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
