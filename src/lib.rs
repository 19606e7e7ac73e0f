//! Application Load Balancer adapter for function runtimes.
//!
//! Lets an ordinary HTTP handler answer requests that a load balancer
//! delivers to a function as JSON events.
//!
//! ```text
//! runtime → payload (decode) → http::to_http_request → Handler
//!         ← payload (encode) ← ResponseCapture::finalize ←┘
//! ```

// Core subsystems
pub mod context;
pub mod error;
pub mod handler;
pub mod http;
pub mod payload;

// Application helpers
pub mod routing;

// Cross-cutting concerns
pub mod config;
pub mod observability;
pub mod security;

pub use config::{AdapterConfig, ResponseOptions};
pub use context::{Context, ContextKey};
pub use error::{AdapterError, AdapterResult};
pub use handler::{handler_fn, wrap, Adapter, Handler, Invocation};
pub use http::{Request, ResponseCapture, ResponseWriter, ELB_CONTEXT_KEY};
pub use payload::{AlbRequest, AlbResponse, Elb};
