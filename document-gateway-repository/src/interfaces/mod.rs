//! Interface definitions for the document store.
//!
//! This module defines the abstract `DocumentStore` trait that the gateway
//! forwards to, allowing the store client to be injected and replaced by
//! test doubles.

mod document_store;

pub use document_store::DocumentStore;
