//! Request paths for document endpoints.
//!
//! The `_doc` type maps onto the typeless endpoints of current OpenSearch
//! and Elasticsearch releases. Any other type uses the legacy typed
//! endpoints.

use opensearch::http::Method;
use url::Url;

use crate::errors::StoreError;

/// The type name served by the typeless document endpoints.
pub const TYPELESS_DOC_TYPE: &str = "_doc";

/// Only used to percent-encode path segments; never contacted.
const PATH_BASE: &str = "http://localhost/";

/// HTTP method and path for one store call.
#[derive(Debug, Clone)]
pub(crate) struct Endpoint {
    pub method: Method,
    pub path: String,
}

impl Endpoint {
    fn new(method: Method, segments: &[&str]) -> Result<Self, StoreError> {
        Ok(Self {
            method,
            path: build_path(segments)?,
        })
    }
}

/// Dot segments are rejected: the url crate drops them when building the
/// path, and the transport resolves `%2E`/`%2E%2E` back into them when it
/// joins the path onto the node URL, so they would address a different
/// resource.
fn build_path(segments: &[&str]) -> Result<String, StoreError> {
    if let Some(segment) = segments.iter().find(|s| matches!(**s, "." | "..")) {
        return Err(StoreError::invalid_request(format!(
            "Path parameter cannot be '{}'",
            segment
        )));
    }

    let mut url = Url::parse(PATH_BASE).map_err(|e| StoreError::invalid_request(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| StoreError::invalid_request("Cannot build request path"))?
        .clear()
        .extend(segments);
    Ok(url.path().to_string())
}

/// A required path parameter, rejected when absent or empty.
pub(crate) fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, StoreError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(StoreError::invalid_request(format!(
            "Missing required parameter: {}",
            name
        ))),
    }
}

/// Type segment for fetch/update/delete; absent types use the typeless endpoint.
fn type_or_default(doc_type: Option<&str>) -> &str {
    match doc_type {
        Some(t) if !t.is_empty() => t,
        _ => TYPELESS_DOC_TYPE,
    }
}

/// `PUT /{index}/{type}/{id}`, or `POST /{index}/{type}` to let the store assign an id.
pub(crate) fn index(index: &str, doc_type: &str, id: Option<&str>) -> Result<Endpoint, StoreError> {
    match id {
        Some(id) if !id.is_empty() => Endpoint::new(Method::Put, &[index, doc_type, id]),
        _ => Endpoint::new(Method::Post, &[index, doc_type]),
    }
}

pub(crate) fn bulk(index: &str, doc_type: &str) -> Result<Endpoint, StoreError> {
    if doc_type == TYPELESS_DOC_TYPE {
        Endpoint::new(Method::Post, &[index, "_bulk"])
    } else {
        Endpoint::new(Method::Post, &[index, doc_type, "_bulk"])
    }
}

pub(crate) fn get(
    index: Option<&str>,
    doc_type: Option<&str>,
    id: Option<&str>,
) -> Result<Endpoint, StoreError> {
    let index = required(index, "index")?;
    let id = required(id, "id")?;
    Endpoint::new(Method::Get, &[index, type_or_default(doc_type), id])
}

pub(crate) fn update(
    index: Option<&str>,
    doc_type: Option<&str>,
    id: Option<&str>,
) -> Result<Endpoint, StoreError> {
    let index = required(index, "index")?;
    let id = required(id, "id")?;
    match type_or_default(doc_type) {
        TYPELESS_DOC_TYPE => Endpoint::new(Method::Post, &[index, "_update", id]),
        doc_type => Endpoint::new(Method::Post, &[index, doc_type, id, "_update"]),
    }
}

pub(crate) fn delete(
    index: Option<&str>,
    doc_type: Option<&str>,
    id: Option<&str>,
) -> Result<Endpoint, StoreError> {
    let index = required(index, "index")?;
    let id = required(id, "id")?;
    Endpoint::new(Method::Delete, &[index, type_or_default(doc_type), id])
}
