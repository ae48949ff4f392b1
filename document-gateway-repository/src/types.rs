//! Store call shapes and bulk response helpers.
//!
//! The gateway translates caller requests into these values and hands them
//! to a [`DocumentStore`](crate::interfaces::DocumentStore). Building an
//! [`IndexCall`] or [`BulkCall`] runs the operation's validation first.

use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::ValidationErrors;
use crate::validation::{validate, ADD_DOCUMENTS_CONSTRAINTS, ADD_DOCUMENT_CONSTRAINTS};
use document_gateway_shared::{BulkDocumentRequest, DocumentRequest};

/// Write acknowledgement requested for bulk writes: one active copy.
pub const BULK_WAIT_FOR_ACTIVE_SHARDS: &str = "1";

/// Single-document index call. Without an `id` the store assigns one.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexCall {
    pub index: String,
    pub doc_type: String,
    pub id: Option<String>,
    pub body: Value,
    pub refresh: Option<bool>,
}

impl TryFrom<DocumentRequest> for IndexCall {
    type Error = ValidationErrors;

    fn try_from(request: DocumentRequest) -> Result<Self, Self::Error> {
        validate(&request, ADD_DOCUMENT_CONSTRAINTS)?;

        Ok(IndexCall {
            index: request
                .index
                .ok_or_else(|| ValidationErrors::missing("index"))?,
            doc_type: request
                .doc_type
                .ok_or_else(|| ValidationErrors::missing("type"))?,
            id: request.id,
            body: request.body.ok_or_else(|| ValidationErrors::missing("body"))?,
            refresh: request.refresh,
        })
    }
}

/// Control line instructing the store to create a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkAction {
    pub create: CreateAction,
}

/// Target of a bulk create action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateAction {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// One line of a bulk payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BulkLine {
    Action(BulkAction),
    Source(Value),
}

impl BulkLine {
    /// Create-action line for a document with the given id.
    pub fn create(id: Option<String>) -> Self {
        BulkLine::Action(BulkAction {
            create: CreateAction { id },
        })
    }
}

/// Bulk create call.
///
/// `lines` alternate create-action and document source, two per document,
/// in the order the documents were supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkCall {
    pub index: String,
    pub doc_type: String,
    pub refresh: bool,
    pub wait_for_active_shards: &'static str,
    pub lines: Vec<BulkLine>,
}

impl BulkCall {
    /// Number of documents in the payload.
    pub fn document_count(&self) -> usize {
        self.lines.len() / 2
    }
}

impl TryFrom<BulkDocumentRequest> for BulkCall {
    type Error = ValidationErrors;

    fn try_from(request: BulkDocumentRequest) -> Result<Self, Self::Error> {
        validate(&request, ADD_DOCUMENTS_CONSTRAINTS)?;

        let documents = request
            .body
            .ok_or_else(|| ValidationErrors::missing("body"))?;

        let mut lines = Vec::with_capacity(documents.len() * 2);
        for document in documents {
            lines.push(BulkLine::create(document_id(&document)));
            lines.push(BulkLine::Source(document));
        }

        Ok(BulkCall {
            index: request
                .index
                .ok_or_else(|| ValidationErrors::missing("index"))?,
            doc_type: request
                .doc_type
                .ok_or_else(|| ValidationErrors::missing("type"))?,
            refresh: true,
            wait_for_active_shards: BULK_WAIT_FOR_ACTIVE_SHARDS,
            lines,
        })
    }
}

/// Identifier carried by a bulk document's `id` field.
fn document_id(document: &Value) -> Option<String> {
    match document.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Fetch-by-id call. Fields are forwarded exactly as the caller gave them.
#[derive(Debug, Clone, PartialEq)]
pub struct GetCall {
    pub index: Option<String>,
    pub doc_type: Option<String>,
    pub id: Option<String>,
}

impl From<DocumentRequest> for GetCall {
    fn from(request: DocumentRequest) -> Self {
        GetCall {
            index: request.index,
            doc_type: request.doc_type,
            id: request.id,
        }
    }
}

/// Partial update call; `doc` is merged into the stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCall {
    pub index: Option<String>,
    pub doc_type: Option<String>,
    pub id: Option<String>,
    pub doc: Option<Value>,
}

impl UpdateCall {
    /// Request body sent to the store: `{"doc": patch}`.
    pub fn payload(&self) -> Value {
        match &self.doc {
            Some(doc) => json!({ "doc": doc }),
            None => json!({}),
        }
    }
}

impl From<DocumentRequest> for UpdateCall {
    fn from(request: DocumentRequest) -> Self {
        UpdateCall {
            index: request.index,
            doc_type: request.doc_type,
            id: request.id,
            doc: request.body,
        }
    }
}

/// Delete-by-id call.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteCall {
    pub index: Option<String>,
    pub doc_type: Option<String>,
    pub id: Option<String>,
}

impl From<DocumentRequest> for DeleteCall {
    fn from(request: DocumentRequest) -> Self {
        DeleteCall {
            index: request.index,
            doc_type: request.doc_type,
            id: request.id,
        }
    }
}

/// Outcome of a single item in a bulk response.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkItemResult {
    /// Document id reported by the store.
    pub id: Option<String>,
    /// Per-item HTTP status.
    pub status: u16,
    /// The store's error object for a failed item.
    pub error: Option<Value>,
}

impl BulkItemResult {
    pub fn succeeded(&self) -> bool {
        self.error.is_none() && (200..300).contains(&self.status)
    }
}

/// Summary of a bulk response: aggregate counts and per-item results.
///
/// The gateway returns bulk responses untouched; this is for callers that
/// want to look at partial failures.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BulkSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<BulkItemResult>,
}

impl BulkSummary {
    /// Read a store bulk response (`{"errors": bool, "items": [...]}`).
    pub fn from_response(response: &Value) -> Self {
        let results: Vec<BulkItemResult> = response
            .get("items")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(parse_item).collect())
            .unwrap_or_default();

        let succeeded = results.iter().filter(|r| r.succeeded()).count();

        BulkSummary {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Each item is keyed by its action name, e.g. `{"create": {...}}`.
fn parse_item(item: &Value) -> Option<BulkItemResult> {
    let (_, outcome) = item.as_object()?.iter().next()?;

    Some(BulkItemResult {
        id: outcome.get("_id").and_then(Value::as_str).map(str::to_string),
        status: outcome
            .get("status")
            .and_then(Value::as_u64)
            .and_then(|s| u16::try_from(s).ok())
            .unwrap_or(0),
        error: outcome.get("error").cloned(),
    })
}
