//! Store error types.
//!
//! This module defines the errors surfaced by a document store. The gateway
//! hands these to its caller exactly as the store produced them.

use serde_json::Value;
use thiserror::Error;

/// Errors returned by a document store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// Failed to set up the connection to the store.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request never produced a response (network failure, timeout).
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The store answered with a non-success status.
    ///
    /// `body` is the store's response body as returned: parsed JSON when
    /// the store sent JSON, otherwise the raw text as a JSON string.
    #[error("Store responded with status {status}: {body}")]
    ResponseError { status: u16, body: Value },

    /// The store client rejected the request before sending it.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A success response could not be read as JSON.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl StoreError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create a response error from a status code and the store's body.
    pub fn response(status: u16, body: Value) -> Self {
        Self::ResponseError { status, body }
    }

    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// HTTP status reported by the store, if it answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ResponseError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the store reported the target document or index as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
