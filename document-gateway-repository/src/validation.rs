//! Declarative request validation.
//!
//! Each validating operation owns a static constraint table. [`validate`]
//! checks every entry of a table against a request and aggregates all
//! failures into one [`ValidationErrors`].

use serde_json::Value;

use crate::errors::{blank_message, ValidationErrors};
use document_gateway_shared::{BulkDocumentRequest, DocumentRequest};

/// Whether a field must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// A presence constraint on one request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldConstraint {
    pub field: &'static str,
    pub presence: Presence,
}

impl FieldConstraint {
    pub const fn required(field: &'static str) -> Self {
        Self {
            field,
            presence: Presence::Required,
        }
    }

    pub const fn optional(field: &'static str) -> Self {
        Self {
            field,
            presence: Presence::Optional,
        }
    }
}

/// Constraints for adding a single document.
pub const ADD_DOCUMENT_CONSTRAINTS: &[FieldConstraint] = &[
    FieldConstraint::optional("id"),
    FieldConstraint::required("index"),
    FieldConstraint::required("body"),
    FieldConstraint::optional("refresh"),
    FieldConstraint::required("type"),
];

/// Constraints for adding documents in bulk.
pub const ADD_DOCUMENTS_CONSTRAINTS: &[FieldConstraint] = &[
    FieldConstraint::required("index"),
    FieldConstraint::required("body"),
    FieldConstraint::required("type"),
];

/// A request whose fields can be checked by name.
pub trait Constrained {
    /// Whether `field` holds a non-blank value. Unknown fields are absent.
    fn is_present(&self, field: &str) -> bool;
}

impl Constrained for DocumentRequest {
    fn is_present(&self, field: &str) -> bool {
        match field {
            "id" => present_str(&self.id),
            "index" => present_str(&self.index),
            "type" => present_str(&self.doc_type),
            "body" => present_value(&self.body),
            "refresh" => self.refresh.is_some(),
            _ => false,
        }
    }
}

impl Constrained for BulkDocumentRequest {
    fn is_present(&self, field: &str) -> bool {
        match field {
            "index" => present_str(&self.index),
            "type" => present_str(&self.doc_type),
            "body" => self.body.as_ref().is_some_and(|docs| !docs.is_empty()),
            _ => false,
        }
    }
}

fn present_str(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

fn present_value(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Check `request` against `constraints`.
///
/// Returns every failing field at once rather than stopping at the first.
pub fn validate<T: Constrained>(
    request: &T,
    constraints: &[FieldConstraint],
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for constraint in constraints {
        if constraint.presence == Presence::Required && !request.is_present(constraint.field) {
            errors.add(constraint.field, blank_message(constraint.field));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
