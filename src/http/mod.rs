//! Handler-facing HTTP abstractions.
//!
//! # Data Flow
//! ```text
//! AlbRequest
//!     → request.rs (to_http_request: query, headers, body, context)
//!     → Request handed to the handler
//!     → handler writes through ResponseWriter (response.rs)
//!     → ResponseCapture::finalize (sniff.rs picks a Content-Type if needed)
//!     → AlbResponse
//! ```

pub mod body;
pub mod header;
pub mod request;
pub mod response;
pub mod sniff;

pub use body::Body;
pub use header::{canonical_header_key, Headers};
pub use request::{to_http_request, Request, RequestUrl, ELB_CONTEXT_KEY};
pub use response::{ResponseCapture, ResponseWriter};
pub use sniff::detect_content_type;
