//! # Document Gateway Shared
//!
//! Request values that callers hand to the document gateway.

mod request;

pub use request::{BulkDocumentRequest, DocumentRequest};
