//! Error types for the document gateway.

mod gateway_error;
mod store_error;
mod validation_error;

pub use gateway_error::GatewayError;
pub use store_error::StoreError;
pub use validation_error::ValidationErrors;
pub(crate) use validation_error::blank_message;
