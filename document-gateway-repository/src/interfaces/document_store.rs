//! Document store trait definition.
//!
//! This module defines the abstract interface for the search-index store,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::StoreError;
use crate::types::{BulkCall, DeleteCall, GetCall, IndexCall, UpdateCall};

/// Abstracts the underlying store client (OpenSearch, Elasticsearch, etc.).
///
/// Implementations are injected into `DocumentGateway`, which keeps the
/// store handle out of global state and lets tests substitute mocks.
///
/// Every method issues one request and returns the store's response body on
/// success. Errors are reported as the store reported them.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; one store is shared by every
/// concurrent gateway call. Connection pooling and in-flight limits are the
/// implementation's concern.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Index a single document, replacing any document with the same id.
    ///
    /// # Arguments
    ///
    /// * `call` - Target index and type, optional id, and the document source
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The store's index response (id, version, result)
    /// * `Err(StoreError)` - If the store rejects the request or is unreachable
    async fn index(&self, call: &IndexCall) -> Result<Value, StoreError>;

    /// Execute a bulk request.
    ///
    /// A successful return may still contain per-item failures in the
    /// response's `items` array.
    async fn bulk(&self, call: &BulkCall) -> Result<Value, StoreError>;

    /// Fetch a document by id.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The stored document
    /// * `Err(StoreError)` - Including not-found, as the store reports it
    async fn get(&self, call: &GetCall) -> Result<Value, StoreError>;

    /// Apply a partial update to a document.
    async fn update(&self, call: &UpdateCall) -> Result<Value, StoreError>;

    /// Delete a document by id.
    async fn delete(&self, call: &DeleteCall) -> Result<Value, StoreError>;

    /// Check if the store is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the store is healthy
    /// * `Ok(false)` - If the store is reachable but unhealthy
    /// * `Err(StoreError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, StoreError>;
}
