//! Gateway error types.

use thiserror::Error;

use super::{StoreError, ValidationErrors};

/// Errors returned by document gateway operations.
///
/// Each variant carries exactly what validation or the store produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// The request failed local validation; the store was not contacted.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The store returned an error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GatewayError {
    /// The validation failures, if this is a validation error.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::Store(_) => None,
        }
    }

    /// The store error, if this came from the store.
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            Self::Store(error) => Some(error),
            Self::Validation(_) => None,
        }
    }
}
