//! Core error value and payload abstraction.
//!
//! [`Fault`] is the one error value every kind shares: a kind identity, a
//! message, an optional opaque payload, an optional shared cause and a
//! debug-gated stack trace.

pub mod fault;

pub use fault::{Fault, Payload};

/// Result alias for protected blocks and fallible entry points.
pub type Outcome = Result<(), Fault>;
