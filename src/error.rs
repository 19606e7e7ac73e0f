//! Adapter error taxonomy.
//!
//! Every failure leaves `invoke` as the error half of its result; no partial
//! response is ever emitted alongside one.

use thiserror::Error;

/// Errors that can occur while translating an invocation.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Inbound document does not match the payload schema.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    /// `isBase64Encoded` was set but the body is not valid base64.
    #[error("unable to decode body as base64: {body}")]
    BodyDecode {
        body: String,
        #[source]
        source: base64::DecodeError,
    },

    /// Handler attempted to write a status outside `[199, 599]`.
    #[error("invalid WriteHeader code {0}")]
    InvalidStatus(u16),

    /// Handler terminated abnormally.
    #[error("{0}")]
    HandlerAbort(String),

    /// Outbound payload could not be turned into a document.
    #[error("failed to encode response payload: {0}")]
    EncodeResponse(#[source] serde_json::Error),
}

/// Result type for adapter operations.
pub type AdapterResult<T> = Result<T, AdapterError>;
