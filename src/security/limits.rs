//! Load balancer payload limits.
//!
//! # Design Decisions
//! - The load balancer rejects bodies over 1 MiB; the adapter only warns,
//!   since it cannot shrink a body and the limit may change upstream

/// Per-invocation body ceiling enforced by the load balancer.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn exceeds_body_limit(len: usize) -> bool {
    len > MAX_BODY_BYTES
}
