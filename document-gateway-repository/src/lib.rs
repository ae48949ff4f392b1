//! # Document Gateway Repository
//!
//! This crate provides the document gateway: a validation gate in front of
//! a search-index store. It includes definitions for errors, the store
//! interface, the store call shapes, and a concrete store implementation
//! for OpenSearch.

pub mod client;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;
pub mod validation;

pub use client::DocumentGateway;
pub use config::OpenSearchConfig;
pub use errors::{GatewayError, StoreError, ValidationErrors};
pub use interfaces::DocumentStore;
pub use crate::opensearch::OpenSearchStore;
pub use types::{BulkCall, BulkSummary, DeleteCall, GetCall, IndexCall, UpdateCall};
