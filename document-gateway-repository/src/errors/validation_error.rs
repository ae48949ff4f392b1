//! Validation error types.

use std::collections::BTreeMap;

use thiserror::Error;

/// Field-level validation failures for a single request.
///
/// Maps each failing field to the messages of the constraints it failed.
/// Fields are kept in name order so the error renders deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("Validation error: {}", summarize(.fields))]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Create an empty set of failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a failure for a single missing field.
    pub fn missing(field: &str) -> Self {
        let mut errors = Self::new();
        errors.add(field, blank_message(field));
        errors
    }

    /// Record a failed constraint for `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Whether no failures were recorded.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether `field` failed any constraint.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Failing field names, in name order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// All failures as a field → messages map.
    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }
}

/// Message for a required field that is absent or empty.
pub(crate) fn blank_message(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => format!("{}{} can't be blank", first.to_uppercase(), chars.as_str()),
        None => "can't be blank".to_string(),
    }
}

fn summarize(fields: &BTreeMap<String, Vec<String>>) -> String {
    fields
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}
