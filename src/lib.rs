//! Structured, hierarchical error values with exception-style control flow.
//!
//! Three capabilities layered on one base error value, [`Fault`]:
//!
//! - **Kind hierarchies**: error kinds declared with [`family!`] derive
//!   from other kinds; [`Fault::is_parent_of`] answers "is this error an
//!   instance of, or derived from, that kind" by walking a static shape
//!   table instead of dynamic type comparison.
//! - **Debug-gated stack traces**: [`set_debug`] turns on call-stack
//!   capture at fault-construction time; production builds pay nothing.
//! - **try/catch/finally**: [`Protected`] scopes intercept raised faults
//!   and dispatch catch/finally handlers, re-propagating anything that does
//!   not belong to the declared error family.
//!
//! # Examples
//!
//! ## Declaring a hierarchy
//!
//! ```
//! use error_kin::family;
//!
//! family! {
//!     /// Any failure talking to the database.
//!     pub DbError;
//!     /// The connection dropped mid-query.
//!     pub ConnError: DbError;
//! }
//!
//! let fault = ConnError::make("connection reset");
//! assert!(fault.derives_from::<DbError>());
//! assert!(!fault.derives_from::<error_kin::standard::StandardError>());
//! ```
//!
//! ## Catching a family, propagating strangers
//!
//! ```
//! use error_kin::{family, protect};
//!
//! family! {
//!     /// Recoverable cache trouble.
//!     pub CacheError;
//! }
//!
//! error_kin::silence_raised_panics();
//!
//! let result = protect(|| CacheError::make("cold cache").raise())
//!     .guard::<CacheError>()
//!     .catch(|_fault| None) // downgrade to success
//!     .finally(|current| current)
//!     .run();
//!
//! assert!(result.is_ok());
//! ```
//!
//! ## Anonymous errors
//!
//! ```
//! error_kin::set_debug(false);
//! let fault = error_kin::make_error!("bad input: {}", 42);
//! assert_eq!(fault.message(), "bad input: 42");
//! ```

/// Process-wide debug switch gating stack-trace capture
pub mod debug;
/// Error-kind hierarchy resolution and the static shape table
pub mod hierarchy;
/// Uncaught-error hook and the outermost protected boundary
pub mod hook;
/// Kind declaration and anonymous-error macros
pub mod macros;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Protected scopes: try/catch/finally over the panic machinery
pub mod protect;
/// Standard error kind and foreign-error decoration
pub mod standard;
/// Debug-gated stack capture
pub mod trace;
/// The core fault value and payload abstraction
pub mod types;

pub use debug::{debug_enabled, set_debug};
pub use hierarchy::{Kind, Shape};
pub use hook::{run_main, set_uncaught_hook, UncaughtHook};
pub use protect::{classify, protect, silence_raised_panics, Caught, Protected, Raised};
pub use standard::{decorate, decorate_boxed, decorate_with, raise_error, source_of, StandardError};
pub use trace::Frame;
pub use types::{Fault, Outcome, Payload};
