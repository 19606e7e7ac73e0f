//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! payload, http and handler modules
//!     → tracing events (debug per invocation, warn on misuse)
//!     → logging.rs subscriber (fmt layer, EnvFilter)
//!     → stdout, collected by the function runtime
//! ```

pub mod logging;
