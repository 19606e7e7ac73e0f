//! Bridge between JSON documents and the payload model.

use serde_json::Value;

use crate::error::{AdapterError, AdapterResult};
use crate::payload::{AlbRequest, AlbResponse};

/// Decode an inbound document handed over by the runtime.
pub fn decode_inbound(document: Value) -> AdapterResult<AlbRequest> {
    serde_json::from_value(document).map_err(AdapterError::MalformedPayload)
}

/// Decode an inbound payload from raw JSON bytes.
pub fn decode_inbound_slice(data: &[u8]) -> AdapterResult<AlbRequest> {
    serde_json::from_slice(data).map_err(AdapterError::MalformedPayload)
}

/// Encode an outbound payload into a document for the runtime.
pub fn encode_outbound(response: &AlbResponse) -> AdapterResult<Value> {
    serde_json::to_value(response).map_err(AdapterError::EncodeResponse)
}
