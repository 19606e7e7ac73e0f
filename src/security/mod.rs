//! Payload safety checks.

pub mod limits;
