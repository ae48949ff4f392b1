//! Caller-facing document requests.
//!
//! Every field is optional at the type level. Whether a field is required
//! depends on the operation it is passed to, and missing fields are reported
//! by the gateway's validation rather than rejected at construction.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request for a single-document operation (add, get, update, delete).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRequest {
    /// Document identifier. Optional for add; the store assigns one when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Target index name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    /// Document type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    /// Document source for add, or the partial patch for update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Ask the store to refresh the index after the write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<bool>,
}

impl DocumentRequest {
    /// Create a request targeting `index` and `doc_type`.
    pub fn new(index: impl Into<String>, doc_type: impl Into<String>) -> Self {
        Self {
            index: Some(index.into()),
            doc_type: Some(doc_type.into()),
            ..Default::default()
        }
    }

    /// Set the document identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the document body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the refresh flag.
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = Some(refresh);
        self
    }
}

/// Request to add many documents in one bulk call.
///
/// Each element of `body` is a document source. Its `id` field, when
/// present, becomes the identifier of the created document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkDocumentRequest {
    /// Target index name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    /// Document type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    /// Documents, in the order they are written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Vec<Value>>,
}

impl BulkDocumentRequest {
    /// Create a bulk request for `documents`.
    pub fn new(index: impl Into<String>, doc_type: impl Into<String>, documents: Vec<Value>) -> Self {
        Self {
            index: Some(index.into()),
            doc_type: Some(doc_type.into()),
            body: Some(documents),
        }
    }
}
