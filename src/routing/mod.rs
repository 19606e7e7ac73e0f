//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Request (method, path, headers)
//!     → router.rs (route lookup)
//!     → matcher.rs (evaluate match conditions)
//!     → matched route's Handler, or 404
//! ```
//!
//! # Design Decisions
//! - Routes fixed at construction, immutable at runtime
//! - No regex in hot path
//! - Deterministic: same input always matches same route
//! - First match wins (registration order)

pub mod matcher;
pub mod router;

pub use matcher::{AndMatcher, HostMatcher, Matcher, MethodMatcher, PathMatcher, PathPrefixMatcher};
pub use router::Router;
