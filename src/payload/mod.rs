//! Load balancer payload model.
//!
//! # Data Flow
//! ```text
//! runtime document (serde_json::Value)
//!     → codec.rs (decode_inbound)
//!     → request.rs (AlbRequest, query/header sources)
//!     → [http::request builds the handler-facing Request]
//!     ...
//!     [http::response finalizes the capture]
//!     → response.rs (AlbResponse)
//!     → codec.rs (encode_outbound)
//!     → runtime document
//! ```
//!
//! # Design Decisions
//! - Purely structural: field types are checked, values are not
//! - Unknown fields are ignored; missing or null fields become empty values
//! - Single/multi value forms are a sum type resolved in one place

pub mod codec;
pub mod request;
pub mod response;

pub use codec::{decode_inbound, decode_inbound_slice, encode_outbound};
pub use request::{AlbRequest, Elb, HeaderSource, QuerySource, RequestContext};
pub use response::AlbResponse;
