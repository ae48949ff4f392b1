//! OpenSearch store implementation.
//!
//! This module provides the concrete implementation of `DocumentStore`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    cluster::ClusterHealthParts,
    http::{
        headers::{HeaderMap, HeaderValue, CONTENT_TYPE},
        request::{Body, JsonBody, NdBody},
        response::Response,
        transport::{SingleNodeConnectionPool, TransportBuilder},
    },
    OpenSearch,
};
use serde_json::Value;
use tracing::{debug, error, info};
use url::Url;

use crate::config::OpenSearchConfig;
use crate::errors::StoreError;
use crate::interfaces::DocumentStore;
use crate::opensearch::paths::{self, Endpoint};
use crate::types::{BulkCall, BulkLine, DeleteCall, GetCall, IndexCall, UpdateCall};

const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// OpenSearch-backed document store.
///
/// # Example
///
/// ```ignore
/// use document_gateway_repository::{DocumentGateway, OpenSearchConfig, OpenSearchStore};
/// let store = OpenSearchStore::new(&OpenSearchConfig::new("http://localhost:9200"))?;
/// let gateway = DocumentGateway::new(Arc::new(store));
/// ```
pub struct OpenSearchStore {
    client: OpenSearch,
}

impl OpenSearchStore {
    /// Create a new store client for the configured URL.
    ///
    /// No request is sent; use `health_check` to verify the connection.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchStore)` - A new client instance
    /// * `Err(StoreError)` - If the URL is invalid or transport setup fails
    pub fn new(config: &OpenSearchConfig) -> Result<Self, StoreError> {
        let parsed_url =
            Url::parse(&config.url).map_err(|e| StoreError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();
        if let Some((username, password)) = config.basic_auth() {
            builder = builder.auth(Credentials::Basic(
                username.to_string(),
                password.to_string(),
            ));
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let transport = builder
            .build()
            .map_err(|e| StoreError::connection(e.to_string()))?;

        info!(
            url = %config.url,
            basic_auth = config.basic_auth().is_some(),
            "Created OpenSearch store"
        );

        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }

    /// Send one request and read the store's answer.
    async fn execute<B>(
        &self,
        endpoint: Endpoint,
        headers: HeaderMap,
        query: Vec<(&'static str, String)>,
        body: Option<B>,
    ) -> Result<Value, StoreError>
    where
        B: Body + Send,
    {
        let query_string = (!query.is_empty()).then_some(&query);

        let response = self
            .client
            .send(
                endpoint.method,
                &endpoint.path,
                headers,
                query_string,
                body,
                None,
            )
            .await
            .map_err(|e| {
                error!(path = %endpoint.path, error = %e, "Store request failed to complete");
                StoreError::transport(e.to_string())
            })?;

        let result = read_response(response).await;
        match &result {
            Ok(_) => debug!(path = %endpoint.path, "Store request succeeded"),
            Err(e) => error!(path = %endpoint.path, error = %e, "Store request failed"),
        }
        result
    }
}

/// Success bodies are returned as parsed; error bodies are kept verbatim.
async fn read_response(response: Response) -> Result<Value, StoreError> {
    let status = response.status_code();
    let text = response
        .text()
        .await
        .map_err(|e| StoreError::transport(e.to_string()))?;

    if status.is_success() {
        serde_json::from_str(&text).map_err(|e| StoreError::parse(e.to_string()))
    } else {
        Err(StoreError::response(status.as_u16(), error_body(text)))
    }
}

fn error_body(text: String) -> Value {
    match serde_json::from_str::<Value>(&text) {
        Ok(body) => body,
        Err(_) => Value::String(text),
    }
}

fn refresh_param(refresh: Option<bool>) -> Vec<(&'static str, String)> {
    refresh
        .map(|refresh| vec![("refresh", refresh.to_string())])
        .unwrap_or_default()
}

fn bulk_params(call: &BulkCall) -> Vec<(&'static str, String)> {
    vec![
        ("refresh", call.refresh.to_string()),
        (
            "wait_for_active_shards",
            call.wait_for_active_shards.to_string(),
        ),
    ]
}

#[async_trait]
impl DocumentStore for OpenSearchStore {
    async fn index(&self, call: &IndexCall) -> Result<Value, StoreError> {
        let endpoint = paths::index(&call.index, &call.doc_type, call.id.as_deref())?;
        debug!(index = %call.index, doc_type = %call.doc_type, id = ?call.id, "Indexing document");

        self.execute(
            endpoint,
            HeaderMap::new(),
            refresh_param(call.refresh),
            Some(JsonBody::new(call.body.clone())),
        )
        .await
    }

    async fn bulk(&self, call: &BulkCall) -> Result<Value, StoreError> {
        let endpoint = paths::bulk(&call.index, &call.doc_type)?;
        debug!(
            index = %call.index,
            doc_type = %call.doc_type,
            count = call.document_count(),
            "Sending bulk request"
        );

        let lines: Vec<JsonBody<BulkLine>> = call.lines.iter().cloned().map(JsonBody::new).collect();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(NDJSON_CONTENT_TYPE));

        self.execute(endpoint, headers, bulk_params(call), Some(NdBody::new(lines)))
            .await
    }

    async fn get(&self, call: &GetCall) -> Result<Value, StoreError> {
        let endpoint = paths::get(
            call.index.as_deref(),
            call.doc_type.as_deref(),
            call.id.as_deref(),
        )?;

        self.execute(endpoint, HeaderMap::new(), Vec::new(), None::<JsonBody<Value>>)
            .await
    }

    async fn update(&self, call: &UpdateCall) -> Result<Value, StoreError> {
        let endpoint = paths::update(
            call.index.as_deref(),
            call.doc_type.as_deref(),
            call.id.as_deref(),
        )?;

        self.execute(
            endpoint,
            HeaderMap::new(),
            Vec::new(),
            Some(JsonBody::new(call.payload())),
        )
        .await
    }

    async fn delete(&self, call: &DeleteCall) -> Result<Value, StoreError> {
        let endpoint = paths::delete(
            call.index.as_deref(),
            call.doc_type.as_deref(),
            call.id.as_deref(),
        )?;

        self.execute(endpoint, HeaderMap::new(), Vec::new(), None::<JsonBody<Value>>)
            .await
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| StoreError::transport(e.to_string()))?;

        let health = read_response(response).await?;
        let status = health
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("unknown");

        info!(status = %status, "OpenSearch cluster status");
        Ok(status == "green" || status == "yellow")
    }
}
