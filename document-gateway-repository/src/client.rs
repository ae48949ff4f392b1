//! Document gateway implementation.
//!
//! This module provides the gateway application code uses to add, fetch,
//! update, and delete documents. The add operations validate their request
//! before contacting the store; the others forward directly.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::errors::GatewayError;
use crate::interfaces::DocumentStore;
use crate::types::{BulkCall, DeleteCall, GetCall, IndexCall, UpdateCall};
use document_gateway_shared::{BulkDocumentRequest, DocumentRequest};

/// The main entry point for document operations.
///
/// Every operation issues at most one store call and returns the store's
/// response or error untouched.
#[derive(Clone)]
pub struct DocumentGateway {
    store: Arc<dyn DocumentStore>,
}

impl DocumentGateway {
    /// Create a new DocumentGateway over the given store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Add a single document.
    /// Input: DocumentRequest (index, type, body required; id, refresh optional)
    /// Output: the store's index response
    #[instrument(skip(self, request), fields(index = ?request.index, id = ?request.id))]
    pub async fn add_document(&self, request: DocumentRequest) -> Result<Value, GatewayError> {
        let call = IndexCall::try_from(request).map_err(|errors| {
            warn!(error = %errors, "Rejected add_document request");
            errors
        })?;

        let response = self.store.index(&call).await?;
        debug!("Document added");
        Ok(response)
    }

    /// Add many documents in one bulk request.
    /// Input: BulkDocumentRequest (index, type, non-empty body required)
    /// Output: the store's bulk response, including any per-item failures
    ///
    /// The bulk request always refreshes the index and acknowledges after one
    /// copy is written.
    #[instrument(skip(self, request), fields(index = ?request.index))]
    pub async fn add_documents(
        &self,
        request: BulkDocumentRequest,
    ) -> Result<Value, GatewayError> {
        let call = BulkCall::try_from(request).map_err(|errors| {
            warn!(error = %errors, "Rejected add_documents request");
            errors
        })?;

        let response = self.store.bulk(&call).await?;
        debug!(count = call.document_count(), "Bulk request completed");
        Ok(response)
    }

    /// Fetch a document by id. No local validation.
    #[instrument(skip(self, request), fields(index = ?request.index, id = ?request.id))]
    pub async fn get_document(&self, request: DocumentRequest) -> Result<Value, GatewayError> {
        let call = GetCall::from(request);
        Ok(self.store.get(&call).await?)
    }

    /// Partially update a document, merging `body` into it. No local validation.
    #[instrument(skip(self, request), fields(index = ?request.index, id = ?request.id))]
    pub async fn update_document(&self, request: DocumentRequest) -> Result<Value, GatewayError> {
        let call = UpdateCall::from(request);
        Ok(self.store.update(&call).await?)
    }

    /// Delete a document by id. No local validation.
    #[instrument(skip(self, request), fields(index = ?request.index, id = ?request.id))]
    pub async fn delete_document(&self, request: DocumentRequest) -> Result<Value, GatewayError> {
        let call = DeleteCall::from(request);
        Ok(self.store.delete(&call).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreError;
    use crate::types::{BulkLine, BulkSummary};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    /// Mock store for testing
    #[derive(Default)]
    struct MockStore {
        calls: AtomicUsize,
        index_calls: Mutex<Vec<IndexCall>>,
        bulk_calls: Mutex<Vec<BulkCall>>,
        get_calls: Mutex<Vec<GetCall>>,
        update_calls: Mutex<Vec<UpdateCall>>,
        delete_calls: Mutex<Vec<DeleteCall>>,
        failure: Option<StoreError>,
    }

    impl MockStore {
        fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        fn failing(error: StoreError) -> Arc<Self> {
            Arc::new(Self {
                failure: Some(error),
                ..Default::default()
            })
        }

        fn respond(&self, response: Value) -> Result<Value, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.failure {
                Some(error) => Err(error.clone()),
                None => Ok(response),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DocumentStore for MockStore {
        async fn index(&self, call: &IndexCall) -> Result<Value, StoreError> {
            self.index_calls.lock().await.push(call.clone());
            self.respond(json!({
                "_index": call.index,
                "_id": call.id.clone().unwrap_or_else(|| "generated".to_string()),
                "_version": 1,
                "result": "created"
            }))
        }

        async fn bulk(&self, call: &BulkCall) -> Result<Value, StoreError> {
            self.bulk_calls.lock().await.push(call.clone());
            let items: Vec<Value> = call
                .lines
                .iter()
                .filter_map(|line| match line {
                    BulkLine::Action(action) => {
                        Some(json!({"create": {"_id": action.create.id, "status": 201}}))
                    }
                    BulkLine::Source(_) => None,
                })
                .collect();
            self.respond(json!({"took": 1, "errors": false, "items": items}))
        }

        async fn get(&self, call: &GetCall) -> Result<Value, StoreError> {
            self.get_calls.lock().await.push(call.clone());
            self.respond(json!({"_id": call.id, "found": true, "_source": {"name": "A"}}))
        }

        async fn update(&self, call: &UpdateCall) -> Result<Value, StoreError> {
            self.update_calls.lock().await.push(call.clone());
            self.respond(json!({"_id": call.id, "result": "updated"}))
        }

        async fn delete(&self, call: &DeleteCall) -> Result<Value, StoreError> {
            self.delete_calls.lock().await.push(call.clone());
            self.respond(json!({"_id": call.id, "result": "deleted"}))
        }

        async fn health_check(&self) -> Result<bool, StoreError> {
            Ok(true)
        }
    }

    fn not_found() -> StoreError {
        StoreError::response(
            404,
            json!({"_index": "users", "_type": "_doc", "_id": "1", "found": false}),
        )
    }

    #[tokio::test]
    async fn test_add_document_without_id() {
        let store = MockStore::new();
        let gateway = DocumentGateway::new(store.clone());

        let request: DocumentRequest = serde_json::from_value(json!({
            "index": "users",
            "type": "_doc",
            "body": {"name": "A"}
        }))
        .unwrap();

        let response = gateway.add_document(request).await.unwrap();

        assert_eq!(response["result"], "created");
        let calls = store.index_calls.lock().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].index, "users");
        assert_eq!(calls[0].doc_type, "_doc");
        assert!(calls[0].id.is_none());
        assert_eq!(calls[0].body, json!({"name": "A"}));
    }

    #[tokio::test]
    async fn test_add_document_with_id() {
        let store = MockStore::new();
        let gateway = DocumentGateway::new(store.clone());

        let request = DocumentRequest::new("users", "_doc")
            .with_id("abc")
            .with_body(json!({"name": "A"}))
            .with_refresh(true);

        let response = gateway.add_document(request).await.unwrap();

        assert_eq!(response["_id"], "abc");
        let calls = store.index_calls.lock().await;
        assert_eq!(calls[0].id.as_deref(), Some("abc"));
        assert_eq!(calls[0].refresh, Some(true));
    }

    #[tokio::test]
    async fn test_add_document_missing_body_and_type() {
        let store = MockStore::new();
        let gateway = DocumentGateway::new(store.clone());

        let request: DocumentRequest =
            serde_json::from_value(json!({"index": "users"})).unwrap();

        let error = gateway.add_document(request).await.unwrap_err();

        let errors = error.validation_errors().expect("validation error");
        assert_eq!(errors.field_names().collect::<Vec<_>>(), vec!["body", "type"]);
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_add_document_each_required_field() {
        for missing in ["index", "body", "type"] {
            let store = MockStore::new();
            let gateway = DocumentGateway::new(store.clone());

            let mut request = DocumentRequest::new("users", "_doc").with_body(json!({"a": 1}));
            match missing {
                "index" => request.index = None,
                "body" => request.body = None,
                _ => request.doc_type = None,
            }

            let error = gateway.add_document(request).await.unwrap_err();

            assert!(matches!(error, GatewayError::Validation(ref e) if e.contains(missing)));
            assert_eq!(store.call_count(), 0, "store called when {} missing", missing);
        }
    }

    #[tokio::test]
    async fn test_add_documents_bulk_payload() {
        let store = MockStore::new();
        let gateway = DocumentGateway::new(store.clone());

        let request: BulkDocumentRequest = serde_json::from_value(json!({
            "index": "users",
            "type": "_doc",
            "body": [{"id": "1", "name": "A"}, {"id": "2", "name": "B"}]
        }))
        .unwrap();

        let response = gateway.add_documents(request).await.unwrap();

        let calls = store.bulk_calls.lock().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].index, "users");
        assert_eq!(calls[0].doc_type, "_doc");
        assert!(calls[0].refresh);
        assert_eq!(calls[0].wait_for_active_shards, "1");
        assert_eq!(
            serde_json::to_value(&calls[0].lines).unwrap(),
            json!([
                {"create": {"_id": "1"}},
                {"id": "1", "name": "A"},
                {"create": {"_id": "2"}},
                {"id": "2", "name": "B"}
            ])
        );

        let summary = BulkSummary::from_response(&response);
        assert_eq!(summary.total, 2);
        assert!(!summary.has_failures());
    }

    #[tokio::test]
    async fn test_add_documents_preserves_order() {
        let store = MockStore::new();
        let gateway = DocumentGateway::new(store.clone());

        let documents: Vec<Value> = (0..25)
            .map(|i| json!({"id": i.to_string(), "n": i}))
            .collect();
        let request = BulkDocumentRequest::new("users", "_doc", documents.clone());

        gateway.add_documents(request).await.unwrap();

        let calls = store.bulk_calls.lock().await;
        let lines = &calls[0].lines;
        assert_eq!(lines.len(), 2 * documents.len());
        for (i, document) in documents.iter().enumerate() {
            assert_eq!(lines[2 * i], BulkLine::create(Some(i.to_string())));
            assert_eq!(lines[2 * i + 1], BulkLine::Source(document.clone()));
        }
    }

    #[tokio::test]
    async fn test_add_documents_validation() {
        let store = MockStore::new();
        let gateway = DocumentGateway::new(store.clone());

        let error = gateway
            .add_documents(BulkDocumentRequest {
                index: Some("users".to_string()),
                doc_type: None,
                body: None,
            })
            .await
            .unwrap_err();

        let errors = error.validation_errors().expect("validation error");
        assert!(errors.contains("type"));
        assert!(errors.contains("body"));
        assert!(!errors.contains("index"));

        let error = gateway
            .add_documents(BulkDocumentRequest::new("users", "_doc", vec![]))
            .await
            .unwrap_err();
        assert!(error.validation_errors().unwrap().contains("body"));

        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_get_update_delete_forward_without_validation() {
        let store = MockStore::new();
        let gateway = DocumentGateway::new(store.clone());

        let request = DocumentRequest::new("users", "_doc").with_id("1");
        gateway.get_document(request.clone()).await.unwrap();
        gateway
            .update_document(request.clone().with_body(json!({"name": "B"})))
            .await
            .unwrap();
        gateway.delete_document(request).await.unwrap();

        // An empty request still reaches the store.
        gateway.get_document(DocumentRequest::default()).await.unwrap();
        gateway.update_document(DocumentRequest::default()).await.unwrap();
        gateway.delete_document(DocumentRequest::default()).await.unwrap();

        assert_eq!(store.call_count(), 6);

        let gets = store.get_calls.lock().await;
        assert_eq!(gets[0].index.as_deref(), Some("users"));
        assert_eq!(gets[0].doc_type.as_deref(), Some("_doc"));
        assert_eq!(gets[0].id.as_deref(), Some("1"));
        assert!(gets[1].index.is_none());

        let updates = store.update_calls.lock().await;
        assert_eq!(updates[0].id.as_deref(), Some("1"));
        assert_eq!(updates[0].payload(), json!({"doc": {"name": "B"}}));

        let deletes = store.delete_calls.lock().await;
        assert_eq!(deletes[0].index.as_deref(), Some("users"));
        assert_eq!(deletes[0].id.as_deref(), Some("1"));
        assert!(deletes[1].id.is_none());
    }

    #[tokio::test]
    async fn test_delete_not_found_passes_through() {
        let store = MockStore::failing(not_found());
        let gateway = DocumentGateway::new(store.clone());

        let error = gateway
            .delete_document(DocumentRequest::new("users", "_doc").with_id("1"))
            .await
            .unwrap_err();

        assert_eq!(error, GatewayError::Store(not_found()));
        assert!(error.store_error().unwrap().is_not_found());
    }

    #[tokio::test]
    async fn test_store_errors_pass_through_unchanged() {
        let failure = StoreError::transport("connection refused");
        let store = MockStore::failing(failure.clone());
        let gateway = DocumentGateway::new(store.clone());

        let error = gateway
            .add_document(DocumentRequest::new("users", "_doc").with_body(json!({"a": 1})))
            .await
            .unwrap_err();
        assert_eq!(error.store_error(), Some(&failure));

        let error = gateway
            .add_documents(BulkDocumentRequest::new("users", "_doc", vec![json!({"id": "1"})]))
            .await
            .unwrap_err();
        assert_eq!(error.store_error(), Some(&failure));

        let error = gateway
            .get_document(DocumentRequest::new("users", "_doc").with_id("1"))
            .await
            .unwrap_err();
        assert_eq!(error.store_error(), Some(&failure));

        let error = gateway
            .update_document(DocumentRequest::new("users", "_doc").with_id("1"))
            .await
            .unwrap_err();
        assert_eq!(error.store_error(), Some(&failure));

        assert_eq!(store.call_count(), 4);
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_independent() {
        let store = MockStore::new();
        let gateway = DocumentGateway::new(store.clone());

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let gateway = gateway.clone();
                tokio::spawn(async move {
                    gateway
                        .add_document(
                            DocumentRequest::new("users", "_doc")
                                .with_id(i.to_string())
                                .with_body(json!({"n": i})),
                        )
                        .await
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        assert_eq!(store.call_count(), 10);
        assert_eq!(store.index_calls.lock().await.len(), 10);
    }
}
